//! Self-play - AI versus AI games
//!
//! Plays a batch of games between two computer players and collects statistics.

use crate::ai::Strategy;
use crate::config::GameConfig;
use crate::dictionary::Dictionary;
use crate::game::{GameError, GameState, Referee};
use crate::search::{CacheStats, PathFinder};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Players seated in every self-play game
pub const SELFPLAY_PLAYERS: [&str; 2] = ["North", "South"];

/// Outcome of a single self-play game
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub base_word: String,
    pub moves: usize,
    pub scores: Vec<(String, u32)>,
    pub winner: Option<String>,
    pub board_full: bool,
    pub longest_word: Option<String>,
}

/// Statistics over a batch of self-play games
#[derive(Debug)]
pub struct SelfPlayStatistics {
    pub total_games: usize,
    pub total_moves: usize,
    pub average_moves: f64,
    pub average_winning_score: f64,
    pub wins: BTreeMap<String, usize>,
    pub draws: usize,
    pub full_boards: usize,
    pub longest_word: Option<String>,
    pub move_distribution: BTreeMap<usize, usize>,
    pub total_time: Duration,
    pub cache: CacheStats,
}

/// Play one game to completion: until the board is full or the player to
/// move has no legal move
#[must_use]
pub fn play_out<S: Strategy + ?Sized>(
    referee: &Referee<'_>,
    mut game: GameState,
    strategy: &S,
) -> GameState {
    while !game.is_board_full() {
        let Some(request) = referee.ai_move(&game, strategy) else {
            break;
        };
        match referee.apply_move(&game, &request) {
            Ok(next) => game = next,
            Err(e) => {
                // Suggestions are legal by construction; stop rather than loop
                debug!("self-play move rejected: {e}");
                break;
            }
        }
    }
    game
}

fn outcome(game: &GameState) -> GameOutcome {
    let leaders = game.leaders();
    let winner = match leaders.as_slice() {
        [only] => Some((*only).to_string()),
        _ => None,
    };
    let longest_word = game
        .moves()
        .iter()
        .map(|m| m.word.as_str())
        .max_by_key(|w| w.chars().count())
        .map(str::to_string);

    GameOutcome {
        base_word: game.base_word().to_string(),
        moves: game.move_count(),
        scores: game
            .players()
            .iter()
            .map(|p| (p.clone(), game.score_of(p)))
            .collect(),
        winner,
        board_full: game.is_board_full(),
        longest_word,
    }
}

/// Run `games` self-play games of size `size`, cycling through `base_words`
///
/// # Errors
///
/// Returns [`GameError`] if a base word cannot start a game on this board.
pub fn run_selfplay<S: Strategy>(
    dictionary: &dyn Dictionary,
    config: &GameConfig,
    strategy: &S,
    games: usize,
    size: usize,
    base_words: &[String],
) -> Result<SelfPlayStatistics, GameError> {
    let paths = PathFinder::new(config.cache_capacity);
    let referee = Referee::new(dictionary, &paths, config);

    println!("🎯 Playing {games} games...");

    let pb = ProgressBar::new(games as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let mut outcomes: Vec<GameOutcome> = Vec::with_capacity(games);
    let total_start = Instant::now();

    for (idx, base_word) in base_words.iter().cycle().take(games).enumerate() {
        let game = GameState::create(format!("selfplay-{idx}"), size, base_word, SELFPLAY_PLAYERS)?;
        let finished = play_out(&referee, game, strategy);
        outcomes.push(outcome(&finished));

        if idx % 5 == 0 {
            let avg =
                outcomes.iter().map(|o| o.moves).sum::<usize>() as f64 / outcomes.len() as f64;
            pb.set_message(format!("Avg moves: {avg:.1}"));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");

    Ok(summarize(&outcomes, total_start.elapsed(), paths.stats()))
}

fn summarize(outcomes: &[GameOutcome], total_time: Duration, cache: CacheStats) -> SelfPlayStatistics {
    let total_games = outcomes.len();
    let total_moves: usize = outcomes.iter().map(|o| o.moves).sum();
    let average_moves = if total_games > 0 {
        total_moves as f64 / total_games as f64
    } else {
        0.0
    };

    let winning_scores: Vec<u32> = outcomes
        .iter()
        .filter_map(|o| o.scores.iter().map(|(_, s)| *s).max())
        .collect();
    let average_winning_score = if winning_scores.is_empty() {
        0.0
    } else {
        f64::from(winning_scores.iter().sum::<u32>()) / winning_scores.len() as f64
    };

    let mut wins: BTreeMap<String, usize> = BTreeMap::new();
    let mut move_distribution: BTreeMap<usize, usize> = BTreeMap::new();
    for o in outcomes {
        if let Some(winner) = &o.winner {
            *wins.entry(winner.clone()).or_insert(0) += 1;
        }
        *move_distribution.entry(o.moves).or_insert(0) += 1;
    }

    let longest_word = outcomes
        .iter()
        .filter_map(|o| o.longest_word.as_deref())
        .max_by_key(|w| w.chars().count())
        .map(str::to_string);

    SelfPlayStatistics {
        total_games,
        total_moves,
        average_moves,
        average_winning_score,
        wins,
        draws: outcomes.iter().filter(|o| o.winner.is_none()).count(),
        full_boards: outcomes.iter().filter(|o| o.board_full).count(),
        longest_word,
        move_distribution,
        total_time,
        cache,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GreedyStrategy;
    use crate::dictionary::WordSet;

    fn words() -> WordSet {
        WordSet::new([
            "cat", "cats", "scat", "act", "acts", "tact", "pact", "pacts", "tab", "bat", "bats",
            "stab", "cab", "cabs", "scab",
        ])
    }

    #[test]
    fn play_out_ends_with_no_moves_left() {
        let words = words();
        let paths = PathFinder::default();
        let config = GameConfig::default();
        let referee = Referee::new(&words, &paths, &config);

        let game = GameState::create("g", 3, "cat", SELFPLAY_PLAYERS).unwrap();
        let finished = play_out(&referee, game, &GreedyStrategy);

        assert!(finished.move_count() > 0);
        assert!(finished.is_board_full() || referee.suggest(&finished, None).is_empty());
        // Every move claimed a distinct word
        let mut used = finished.used_words().to_vec();
        used.sort();
        used.dedup();
        assert_eq!(used.len(), finished.used_words().len());
    }

    #[test]
    fn statistics_add_up() {
        let words = words();
        let config = GameConfig::default();
        let stats = run_selfplay(
            &words,
            &config,
            &GreedyStrategy,
            4,
            3,
            &["cat".to_string(), "tab".to_string()],
        )
        .unwrap();

        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.draws + stats.wins.values().sum::<usize>(), 4);
        assert_eq!(stats.move_distribution.values().sum::<usize>(), 4);
        assert!(stats.total_moves > 0);
        assert!(stats.cache.misses > 0);
    }

    #[test]
    fn bad_base_word_is_an_error() {
        let words = words();
        let config = GameConfig::default();
        let result = run_selfplay(
            &words,
            &config,
            &GreedyStrategy,
            1,
            3,
            &["pacts".to_string()],
        );
        assert!(matches!(result, Err(GameError::Board(_))));
    }

    #[test]
    fn single_leader_wins() {
        let game = GameState::create("g", 3, "cat", SELFPLAY_PLAYERS).unwrap();
        // No moves: both on zero
        assert_eq!(outcome(&game).winner, None);
    }
}
