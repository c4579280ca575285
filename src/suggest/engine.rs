//! Suggestion search
//!
//! Each `(frontier cell, letter)` placement is searched independently on its
//! own copy of the board, so placements are spread across the rayon pool.

use crate::config::GameConfig;
use crate::core::{Board, Position, normalize_word};
use crate::dictionary::{Dictionary, PrefixIndex};
use log::debug;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate move: place `letter` at `position` and claim `word`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub position: Position,
    pub letter: char,
    pub word: String,
    pub score: f64,
}

impl Suggestion {
    /// Ranking order: score desc, length desc, then word, cell and letter asc
    fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.word.chars().count().cmp(&self.word.chars().count()))
            .then_with(|| self.word.cmp(&other.word))
            .then_with(|| self.position.cmp(&other.position))
            .then_with(|| self.letter.cmp(&other.letter))
    }
}

/// Ranked suggestions for `board` with default settings
///
/// # Examples
/// ```
/// use balda::core::Board;
/// use balda::dictionary::WordSet;
/// use balda::suggest::suggest_words;
///
/// let mut board = Board::new(5).unwrap();
/// board.place_base_word("cat").unwrap();
/// let words = WordSet::new(["cat", "scat", "cats"]);
///
/// let suggestions = suggest_words(&board, &words, Some(3));
/// assert_eq!(suggestions.len(), 3);
/// assert!(suggestions.iter().all(|s| s.word.len() == 4));
/// ```
#[must_use]
pub fn suggest_words(
    board: &Board,
    dictionary: &dyn Dictionary,
    limit: Option<usize>,
) -> Vec<Suggestion> {
    SuggestionEngine::new(dictionary, &GameConfig::default()).suggest(board, limit)
}

/// Suggestion search over one dictionary and configuration
pub struct SuggestionEngine<'a> {
    dictionary: &'a dyn Dictionary,
    config: &'a GameConfig,
}

/// Per-placement DFS state
struct Walk<'b> {
    board: &'b Board,
    placed: Position,
    prefix: Option<&'b dyn PrefixIndex>,
    visited: Vec<bool>,
    word: String,
    depth: usize,
    found: FxHashSet<String>,
}

impl<'a> SuggestionEngine<'a> {
    pub const fn new(dictionary: &'a dyn Dictionary, config: &'a GameConfig) -> Self {
        Self { dictionary, config }
    }

    /// Ranked suggestions for `board`
    ///
    /// `limit` is clamped to `[1, max_suggestions]`; `None` selects the
    /// configured default. The board is never modified.
    #[must_use]
    pub fn suggest(&self, board: &Board, limit: Option<usize>) -> Vec<Suggestion> {
        self.suggest_excluding(board, limit, &[])
    }

    /// Ranked suggestions that skip any word in `exclude`
    #[must_use]
    pub fn suggest_excluding(
        &self,
        board: &Board,
        limit: Option<usize>,
        exclude: &[String],
    ) -> Vec<Suggestion> {
        let limit = self.config.clamp_limit(limit);
        let exclude: FxHashSet<String> = exclude.iter().map(|w| normalize_word(w)).collect();
        let alphabet = self.dictionary.alphabet();
        let placements: Vec<(Position, char)> = board
            .frontier()
            .into_iter()
            .flat_map(|pos| alphabet.iter().map(move |&letter| (pos, letter)))
            .collect();

        let prefix = self.dictionary.prefix_index();
        if prefix.is_none() {
            debug!(
                "dictionary has no prefix index, bounding search at {} letters",
                self.config.max_word_len
            );
        }

        let exclude = &exclude;
        let candidates: Vec<Suggestion> = placements
            .par_iter()
            .flat_map_iter(|&(pos, letter)| {
                self.words_for_placement(board, pos, letter, prefix)
                    .into_iter()
                    .filter(move |word| !exclude.contains(word))
                    .map(move |word| Suggestion {
                        score: self.score(&word, letter),
                        position: pos,
                        letter,
                        word,
                    })
            })
            .collect();

        let mut best: FxHashMap<(Position, char, String), f64> = FxHashMap::default();
        for s in candidates {
            let entry = best
                .entry((s.position, s.letter, s.word))
                .or_insert(f64::NEG_INFINITY);
            *entry = entry.max(s.score);
        }

        let mut suggestions: Vec<Suggestion> = best
            .into_iter()
            .map(|((position, letter, word), score)| Suggestion {
                position,
                letter,
                word,
                score,
            })
            .collect();
        suggestions.sort_by(Suggestion::rank);

        debug!(
            "{} suggestions over {} placements, returning {}",
            suggestions.len(),
            placements.len(),
            limit.min(suggestions.len())
        );
        suggestions.truncate(limit);
        suggestions
    }

    /// Policy points plus a small bonus for placing a rare letter
    fn score(&self, word: &str, letter: char) -> f64 {
        let bonus = self
            .dictionary
            .letter_frequency(letter)
            .map_or(0.0, |freq| 1.0 / (1.0 + f64::from(freq)));
        f64::from(self.config.scoring.score(word)) + bonus
    }

    /// Every dictionary word spelled by a simple path through `pos` once
    /// `letter` is placed there
    fn words_for_placement(
        &self,
        board: &Board,
        pos: Position,
        letter: char,
        prefix: Option<&dyn PrefixIndex>,
    ) -> FxHashSet<String> {
        let placed = board.with_letter(pos, letter);
        let size = placed.size();
        let mut walk = Walk {
            board: &placed,
            placed: pos,
            prefix,
            visited: vec![false; size * size],
            word: String::new(),
            depth: 0,
            found: FxHashSet::default(),
        };

        for start in placed.occupied_positions() {
            self.extend(&mut walk, start, false);
        }
        walk.found
    }

    fn extend(&self, walk: &mut Walk<'_>, at: Position, through: bool) {
        let Some(ch) = walk.board.get(at) else {
            return;
        };
        let size = walk.board.size();
        let idx = at.row * size + at.col;

        walk.visited[idx] = true;
        walk.word.push(ch);
        walk.depth += 1;
        let through = through || at == walk.placed;

        let viable = walk.prefix.is_none_or(|index| index.has_prefix(&walk.word));
        if viable {
            if through
                && walk.depth >= self.config.min_word_len
                && self.dictionary.contains(&walk.word)
            {
                walk.found.insert(walk.word.clone());
            }

            if walk.prefix.is_some() || walk.depth < self.config.max_word_len {
                for next in walk.board.neighbors(at) {
                    if !walk.visited[next.row * size + next.col] {
                        self.extend(walk, next, through);
                    }
                }
            }
        }

        walk.depth -= 1;
        walk.word.pop();
        walk.visited[idx] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordSet;
    use crate::game::ScoringPolicy;

    /// Membership only: forces the depth-bounded search
    struct Plain(WordSet);

    impl Dictionary for Plain {
        fn contains(&self, word: &str) -> bool {
            self.0.contains(word)
        }

        fn alphabet(&self) -> Vec<char> {
            self.0.alphabet()
        }

        fn letter_frequency(&self, letter: char) -> Option<u32> {
            self.0.letter_frequency(letter)
        }
    }

    fn cat_board() -> Board {
        let mut board = Board::new(5).unwrap();
        board.place_base_word("cat").unwrap();
        board
    }

    fn words() -> WordSet {
        WordSet::new(["scat", "cats", "cat", "at"])
    }

    fn engine_suggest(dictionary: &dyn Dictionary, limit: Option<usize>) -> Vec<Suggestion> {
        let config = GameConfig::default();
        SuggestionEngine::new(dictionary, &config).suggest(&cat_board(), limit)
    }

    #[test]
    fn finds_every_placement() {
        let suggestions = engine_suggest(&words(), Some(100));

        // SCAT from three cells around C, CATS from three around T, and CAT
        // through a new C or T above or below A
        assert_eq!(suggestions.len(), 10);
        assert_eq!(suggestions.iter().filter(|s| s.word == "SCAT").count(), 3);
        assert_eq!(suggestions.iter().filter(|s| s.word == "CATS").count(), 3);
        assert_eq!(suggestions.iter().filter(|s| s.word == "CAT").count(), 4);
        assert!(suggestions.iter().all(|s| s.word != "AT"));
    }

    #[test]
    fn ranked_by_score_then_length_then_word() {
        let suggestions = engine_suggest(&words(), Some(100));

        for pair in suggestions.windows(2) {
            assert_ne!(pair[0].rank(&pair[1]), Ordering::Greater);
        }

        // Length wins, then the rarer placed letter: C (3 uses) before T (4)
        let words: Vec<&str> = suggestions.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(&words[..6], ["CATS", "CATS", "CATS", "SCAT", "SCAT", "SCAT"]);
        assert_eq!(suggestions[6].letter, 'C');
        assert_eq!(suggestions[9].letter, 'T');
        assert!((suggestions[0].score - (4.0 + 1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn suggestions_are_unique() {
        let suggestions = engine_suggest(&words(), Some(100));
        let keys: FxHashSet<(Position, char, &str)> = suggestions
            .iter()
            .map(|s| (s.position, s.letter, s.word.as_str()))
            .collect();
        assert_eq!(keys.len(), suggestions.len());
    }

    #[test]
    fn limit_keeps_the_best() {
        let all = engine_suggest(&words(), Some(100));
        let top = engine_suggest(&words(), Some(3));
        assert_eq!(top.len(), 3);
        assert_eq!(top, all[..3]);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(engine_suggest(&words(), Some(0)).len(), 1);
        assert_eq!(engine_suggest(&words(), None).len(), 10);
    }

    #[test]
    fn exhaustive_search_matches_pruned_search() {
        let pruned = engine_suggest(&words(), Some(100));
        let exhaustive = engine_suggest(&Plain(words()), Some(100));
        assert_eq!(pruned, exhaustive);
    }

    #[test]
    fn every_suggestion_is_a_legal_move() {
        let board = cat_board();
        for s in engine_suggest(&words(), Some(100)) {
            assert!(board.can_place(s.position));
            assert!(board.is_adjacent_to_existing(s.position));
            let placed = board.with_letter(s.position, s.letter);
            assert!(crate::search::exists_path_for_word(
                &placed,
                &s.word,
                s.position
            ));
        }
    }

    #[test]
    fn excluded_words_are_skipped() {
        let words = words();
        let config = GameConfig::default();
        let engine = SuggestionEngine::new(&words, &config);
        let suggestions =
            engine.suggest_excluding(&cat_board(), Some(100), &["scat".to_string()]);
        assert_eq!(suggestions.len(), 7);
        assert!(suggestions.iter().all(|s| s.word != "SCAT"));
    }

    #[test]
    fn board_is_left_untouched() {
        let board = cat_board();
        let before = board.clone();
        let _ = suggest_words(&board, &words(), None);
        assert_eq!(board, before);
    }

    #[test]
    fn rarity_policy_changes_scores() {
        let words = words();
        let config = GameConfig {
            scoring: ScoringPolicy::Rarity,
            ..GameConfig::default()
        };
        let suggestions = SuggestionEngine::new(&words, &config).suggest(&cat_board(), Some(1));
        // S1 C2 A1 T1
        assert!((suggestions[0].score - (5.0 + 1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn full_board_has_no_suggestions() {
        let board = Board::from_rows(&["CAT", "ACT", "TAC"]).unwrap();
        assert!(suggest_words(&board, &words(), None).is_empty());
    }

    #[test]
    fn suggestion_json_shape() {
        let s = Suggestion {
            position: Position::new(1, 0),
            letter: 'S',
            word: "SHELL".to_string(),
            score: 5.5,
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["position"]["row"], 1);
        assert_eq!(json["letter"], "S");
        assert_eq!(json["word"], "SHELL");
    }
}
