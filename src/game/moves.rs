//! Move validation and application
//!
//! A move is checked in a fixed order and the first failing check wins. The
//! letter is placed on a copy of the board; the caller's `GameState` is only
//! read, so a rejected move cannot leave any trace.

use super::state::{AppliedMove, GameState};
use crate::ai::Strategy;
use crate::config::GameConfig;
use crate::core::{Board, Position, normalize_letter, normalize_word};
use crate::dictionary::Dictionary;
use crate::search::PathFinder;
use crate::suggest::{Suggestion, SuggestionEngine};
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A move as submitted by a player, before normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub player_id: String,
    pub position: Position,
    pub letter: String,
    pub word: String,
}

impl MoveRequest {
    pub fn new(
        player_id: impl Into<String>,
        position: Position,
        letter: impl Into<String>,
        word: impl Into<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            position,
            letter: letter.into(),
            word: word.into(),
        }
    }

    /// Request that plays `suggestion` on behalf of `player_id`
    pub fn from_suggestion(player_id: impl Into<String>, suggestion: &Suggestion) -> Self {
        Self::new(
            player_id,
            suggestion.position,
            suggestion.letter.to_string(),
            suggestion.word.clone(),
        )
    }
}

/// Broad class of a rejected move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    Malformed,
    Turn,
    Dictionary,
    Placement,
    Uniqueness,
    Consistency,
    Path,
}

/// Why a move was rejected
///
/// These are routine outcomes of player input, returned as values. The
/// `Display` text is the reason shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the placed letter is missing or not alphabetic")]
    InvalidLetter,
    #[error("the word is empty")]
    EmptyWord,
    #[error("it is {expected}'s turn, not {player}'s")]
    NotYourTurn { player: String, expected: String },
    #[error("'{0}' is not in the dictionary")]
    NotInDictionary(String),
    #[error("cell {0} is outside the board")]
    OutOfBounds(Position),
    #[error("cell {0} is already occupied")]
    CellOccupied(Position),
    #[error("cell {0} does not touch any letter")]
    NotAdjacent(Position),
    #[error("'{0}' has already been played in this game")]
    WordAlreadyUsed(String),
    #[error("the letter '{letter}' does not occur in '{word}'")]
    LetterNotInWord { letter: char, word: String },
    #[error("'{word}' cannot be traced through {position}")]
    NoValidPath { word: String, position: Position },
}

impl MoveError {
    #[must_use]
    pub const fn violation(&self) -> Violation {
        match self {
            Self::InvalidLetter | Self::EmptyWord => Violation::Malformed,
            Self::NotYourTurn { .. } => Violation::Turn,
            Self::NotInDictionary(_) => Violation::Dictionary,
            Self::OutOfBounds(_) | Self::CellOccupied(_) | Self::NotAdjacent(_) => {
                Violation::Placement
            }
            Self::WordAlreadyUsed(_) => Violation::Uniqueness,
            Self::LetterNotInWord { .. } => Violation::Consistency,
            Self::NoValidPath { .. } => Violation::Path,
        }
    }
}

/// Applies the rules of Balda to game states
///
/// Holds borrowed collaborators only; one referee can serve any number of
/// games. It does not serialize concurrent moves on the same game: callers
/// must allow at most one `apply_move` per game at a time.
pub struct Referee<'a> {
    dictionary: &'a dyn Dictionary,
    paths: &'a PathFinder,
    config: &'a GameConfig,
}

impl<'a> Referee<'a> {
    pub const fn new(
        dictionary: &'a dyn Dictionary,
        paths: &'a PathFinder,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            dictionary,
            paths,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        self.config
    }

    /// Validate `request` against `game` and return the resulting state
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`MoveError`]; `game` is unchanged.
    ///
    /// # Examples
    /// ```
    /// use balda::config::GameConfig;
    /// use balda::core::Position;
    /// use balda::dictionary::WordSet;
    /// use balda::game::{GameState, MoveRequest, Referee};
    /// use balda::search::PathFinder;
    ///
    /// let words = WordSet::new(["hello", "shell"]);
    /// let paths = PathFinder::default();
    /// let config = GameConfig::default();
    /// let referee = Referee::new(&words, &paths, &config);
    ///
    /// let game = GameState::create("g", 5, "hello", ["A", "B"]).unwrap();
    /// let request = MoveRequest::new("A", Position::new(1, 0), "s", "shell");
    /// let next = referee.apply_move(&game, &request).unwrap();
    /// assert_eq!(next.score_of("A"), 5);
    /// ```
    pub fn apply_move(
        &self,
        game: &GameState,
        request: &MoveRequest,
    ) -> Result<GameState, MoveError> {
        let result = self.check_and_apply(game, request);

        match &result {
            Ok(_) => debug!(
                "game {}: {} played {} at {}",
                game.id(),
                request.player_id,
                normalize_word(&request.word),
                request.position
            ),
            Err(e) => debug!(
                "game {}: rejected move by {}: {e}",
                game.id(),
                request.player_id
            ),
        }

        result
    }

    fn check_and_apply(
        &self,
        game: &GameState,
        request: &MoveRequest,
    ) -> Result<GameState, MoveError> {
        let letter = normalize_letter(&request.letter)
            .filter(|c| c.is_alphabetic())
            .ok_or(MoveError::InvalidLetter)?;
        let word = normalize_word(&request.word);
        if word.is_empty() {
            return Err(MoveError::EmptyWord);
        }

        let expected = game.current_player();
        if request.player_id != expected {
            return Err(MoveError::NotYourTurn {
                player: request.player_id.clone(),
                expected: expected.to_string(),
            });
        }

        if !self.dictionary.contains(&word) {
            return Err(MoveError::NotInDictionary(word));
        }

        let position = request.position;
        let board = game.board();
        if !Board::is_inside(board.size(), position) {
            return Err(MoveError::OutOfBounds(position));
        }
        if !board.can_place(position) {
            return Err(MoveError::CellOccupied(position));
        }
        if !board.is_adjacent_to_existing(position) {
            return Err(MoveError::NotAdjacent(position));
        }

        if game.is_word_used(&word) {
            return Err(MoveError::WordAlreadyUsed(word));
        }

        if !word.contains(letter) {
            return Err(MoveError::LetterNotInWord { letter, word });
        }

        let placed = board.with_letter(position, letter);
        if !self.paths.exists_path_for_word(&placed, &word, position) {
            return Err(MoveError::NoValidPath { word, position });
        }

        let points = self.config.scoring.score(&word);
        let applied = AppliedMove {
            player_id: request.player_id.clone(),
            position,
            letter,
            word,
            applied_at: Utc::now(),
        };

        Ok(game.commit(applied, placed, points))
    }

    /// Ranked suggestions for the player to move
    ///
    /// Words already played in `game` are left out.
    #[must_use]
    pub fn suggest(&self, game: &GameState, limit: Option<usize>) -> Vec<Suggestion> {
        SuggestionEngine::new(self.dictionary, self.config).suggest_excluding(
            game.board(),
            limit,
            game.used_words(),
        )
    }

    /// Move chosen by `strategy` for the current player, if any move exists
    #[must_use]
    pub fn ai_move<S: Strategy + ?Sized>(
        &self,
        game: &GameState,
        strategy: &S,
    ) -> Option<MoveRequest> {
        let suggestions = self.suggest(game, Some(self.config.max_suggestions));
        strategy
            .select_move(&suggestions)
            .map(|s| MoveRequest::from_suggestion(game.current_player(), s))
    }
}
