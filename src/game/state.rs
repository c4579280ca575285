//! Game state aggregate and lifecycle
//!
//! A `GameState` is an immutable value: moves and renames produce a new state
//! and leave the old one untouched.

use crate::core::{Board, BoardError, Position, normalize_word};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Minimum number of players in a game
pub const MIN_PLAYERS: usize = 2;

/// Construction-time and bookkeeping errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("a game needs at least {MIN_PLAYERS} players, got {0}")]
    TooFewPlayers(usize),
    #[error("player id must not be empty")]
    EmptyPlayerId,
    #[error("player '{0}' is listed twice")]
    DuplicatePlayer(String),
    #[error("AI player '{0}' is not a player in this game")]
    UnknownAiPlayer(String),
    #[error("player '{0}' is not in this game")]
    UnknownPlayer(String),
    #[error("player '{0}' already exists")]
    PlayerExists(String),
    #[error("current player index {index} is out of range for {players} players")]
    TurnOutOfRange { index: usize, players: usize },
    #[error("game size {size} does not match board size {board}")]
    SizeMismatch { size: usize, board: usize },
}

/// A move that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedMove {
    pub player_id: String,
    pub position: Position,
    pub letter: char,
    pub word: String,
    pub applied_at: DateTime<Utc>,
}

/// Aggregate root of one Balda game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGameState")]
pub struct GameState {
    id: String,
    board: Board,
    players: Vec<String>,
    ai_players: Vec<String>,
    current_player_index: usize,
    moves: Vec<AppliedMove>,
    scores: BTreeMap<String, u32>,
    used_words: Vec<String>,
    created_at: DateTime<Utc>,
    size: usize,
    base_word: String,
}

/// Game as it appears on disk, before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameState {
    id: String,
    board: Board,
    players: Vec<String>,
    ai_players: Vec<String>,
    current_player_index: usize,
    moves: Vec<AppliedMove>,
    scores: BTreeMap<String, u32>,
    used_words: Vec<String>,
    created_at: DateTime<Utc>,
    size: usize,
    base_word: String,
}

impl TryFrom<RawGameState> for GameState {
    type Error = GameError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        check_players(&raw.players)?;
        if let Some(stray) = raw.ai_players.iter().find(|p| !raw.players.contains(p)) {
            return Err(GameError::UnknownAiPlayer(stray.clone()));
        }
        if raw.current_player_index >= raw.players.len() {
            return Err(GameError::TurnOutOfRange {
                index: raw.current_player_index,
                players: raw.players.len(),
            });
        }
        if raw.size != raw.board.size() {
            return Err(GameError::SizeMismatch {
                size: raw.size,
                board: raw.board.size(),
            });
        }

        Ok(Self {
            id: raw.id,
            board: raw.board,
            players: raw.players,
            ai_players: raw.ai_players,
            current_player_index: raw.current_player_index,
            moves: raw.moves,
            scores: raw.scores,
            used_words: raw.used_words,
            created_at: raw.created_at,
            size: raw.size,
            base_word: raw.base_word,
        })
    }
}

/// At least [`MIN_PLAYERS`] players, none blank, none repeated
fn check_players(players: &[String]) -> Result<(), GameError> {
    if players.len() < MIN_PLAYERS {
        return Err(GameError::TooFewPlayers(players.len()));
    }
    for (i, player) in players.iter().enumerate() {
        if player.trim().is_empty() {
            return Err(GameError::EmptyPlayerId);
        }
        if players[..i].contains(player) {
            return Err(GameError::DuplicatePlayer(player.clone()));
        }
    }
    Ok(())
}

impl GameState {
    /// Create a game with human players only
    ///
    /// # Errors
    ///
    /// See [`GameState::create_with_ai`].
    ///
    /// # Examples
    /// ```
    /// use balda::game::GameState;
    ///
    /// let game = GameState::create("g1", 5, "hello", ["A", "B"]).unwrap();
    /// assert_eq!(game.current_player(), "A");
    /// assert_eq!(game.used_words(), ["HELLO"]);
    /// ```
    pub fn create<P>(
        id: impl Into<String>,
        size: usize,
        base_word: &str,
        players: P,
    ) -> Result<Self, GameError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::create_with_ai(id, size, base_word, players, std::iter::empty::<String>())
    }

    /// Create a game, flagging some players as AI-controlled
    ///
    /// The board is `size`×`size` with `base_word` centered on the middle
    /// row. The base word counts as used; every score starts at zero and the
    /// first listed player moves first.
    ///
    /// # Errors
    ///
    /// - [`GameError::Board`] for a board below the minimum size or a base
    ///   word that is empty, non-alphabetic or wider than the board
    /// - [`GameError::TooFewPlayers`], [`GameError::EmptyPlayerId`],
    ///   [`GameError::DuplicatePlayer`] for a bad player list
    /// - [`GameError::UnknownAiPlayer`] if an AI player is not a player
    pub fn create_with_ai<P, A>(
        id: impl Into<String>,
        size: usize,
        base_word: &str,
        players: P,
        ai_players: A,
    ) -> Result<Self, GameError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let mut board = Board::new(size)?;
        board.place_base_word(base_word)?;

        let players: Vec<String> = players.into_iter().map(Into::into).collect();
        check_players(&players)?;

        let mut ai: Vec<String> = Vec::new();
        for player in ai_players.into_iter().map(Into::into) {
            if !players.contains(&player) {
                return Err(GameError::UnknownAiPlayer(player));
            }
            if !ai.contains(&player) {
                ai.push(player);
            }
        }

        let base_word = normalize_word(base_word);
        let scores = players.iter().map(|p| (p.clone(), 0)).collect();

        Ok(Self {
            id: id.into(),
            board,
            players,
            ai_players: ai,
            current_player_index: 0,
            moves: Vec::new(),
            scores,
            used_words: vec![base_word.clone()],
            created_at: Utc::now(),
            size,
            base_word,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    #[must_use]
    pub fn ai_players(&self) -> &[String] {
        &self.ai_players
    }

    #[must_use]
    pub const fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Player whose turn it is
    #[must_use]
    pub fn current_player(&self) -> &str {
        self.players
            .get(self.current_player_index)
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_ai(&self, player: &str) -> bool {
        self.ai_players.iter().any(|p| p == player)
    }

    #[must_use]
    pub fn moves(&self) -> &[AppliedMove] {
        &self.moves
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub const fn scores(&self) -> &BTreeMap<String, u32> {
        &self.scores
    }

    #[must_use]
    pub fn score_of(&self, player: &str) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    /// Players sharing the highest score, in turn order
    #[must_use]
    pub fn leaders(&self) -> Vec<&str> {
        let best = self.scores.values().copied().max().unwrap_or(0);
        self.players
            .iter()
            .filter(|p| self.score_of(p) == best)
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    /// True if the normalized form of `word` was already played
    #[must_use]
    pub fn is_word_used(&self, word: &str) -> bool {
        let word = normalize_word(word);
        self.used_words.iter().any(|w| *w == word)
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn base_word(&self) -> &str {
        &self.base_word
    }

    /// Derived end condition: no empty cell remains
    #[must_use]
    pub fn is_board_full(&self) -> bool {
        self.board.is_full()
    }

    /// New state with `applied` committed on `board`
    ///
    /// Only called after every validation step has passed.
    pub(super) fn commit(&self, applied: AppliedMove, board: Board, points: u32) -> Self {
        let mut next = self.clone();

        *next.scores.entry(applied.player_id.clone()).or_insert(0) += points;
        next.used_words.push(applied.word.clone());
        next.moves.push(applied);
        next.current_player_index = (self.current_player_index + 1) % self.players.len();
        next.board = board;

        next
    }

    /// New state with player `old` renamed to `new`
    ///
    /// Rewrites the player list, the AI list, the score key (keeping its
    /// value) and the player id of every past move.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownPlayer`] if `old` is not playing,
    /// [`GameError::EmptyPlayerId`] for a blank `new`, and
    /// [`GameError::PlayerExists`] if `new` is already taken.
    pub fn rename_player(&self, old: &str, new: &str) -> Result<Self, GameError> {
        if !self.players.iter().any(|p| p == old) {
            return Err(GameError::UnknownPlayer(old.to_string()));
        }
        if new.trim().is_empty() {
            return Err(GameError::EmptyPlayerId);
        }
        if old == new {
            return Ok(self.clone());
        }
        if self.players.iter().any(|p| p == new) {
            return Err(GameError::PlayerExists(new.to_string()));
        }

        let rename = |id: &mut String| {
            if id.as_str() == old {
                *id = new.to_string();
            }
        };

        let mut next = self.clone();
        next.players.iter_mut().for_each(rename);
        next.ai_players.iter_mut().for_each(rename);
        next.moves.iter_mut().for_each(|m| rename(&mut m.player_id));

        let score = next.scores.remove(old).unwrap_or(0);
        next.scores.insert(new.to_string(), score);

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_game() -> GameState {
        GameState::create("g1", 5, "hello", ["A", "B"]).unwrap()
    }

    fn fake_move(player: &str, word: &str) -> AppliedMove {
        AppliedMove {
            player_id: player.to_string(),
            position: Position::new(1, 0),
            letter: 'S',
            word: word.to_string(),
            applied_at: Utc::now(),
        }
    }

    #[test]
    fn create_initializes_everything() {
        let game = two_player_game();
        assert_eq!(game.id(), "g1");
        assert_eq!(game.size(), 5);
        assert_eq!(game.base_word(), "HELLO");
        assert_eq!(game.board().to_string(), ".....\n.....\nHELLO\n.....\n.....");
        assert_eq!(game.used_words(), ["HELLO"]);
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.score_of("A"), 0);
        assert_eq!(game.score_of("B"), 0);
        assert_eq!(game.scores().len(), 2);
        assert!(game.moves().is_empty());
        assert!(game.ai_players().is_empty());
    }

    #[test]
    fn create_rejects_bad_configuration() {
        assert_eq!(
            GameState::create("g", 2, "a", ["A", "B"]),
            Err(GameError::Board(BoardError::TooSmall { size: 2 }))
        );
        assert!(matches!(
            GameState::create("g", 3, "hello", ["A", "B"]),
            Err(GameError::Board(BoardError::BaseWordTooLong { .. }))
        ));
        assert_eq!(
            GameState::create("g", 5, "cat", ["A"]),
            Err(GameError::TooFewPlayers(1))
        );
        assert_eq!(
            GameState::create("g", 5, "cat", ["A", " "]),
            Err(GameError::EmptyPlayerId)
        );
        assert_eq!(
            GameState::create("g", 5, "cat", ["A", "B", "A"]),
            Err(GameError::DuplicatePlayer("A".to_string()))
        );
        assert_eq!(
            GameState::create_with_ai("g", 5, "cat", ["A", "B"], ["C"]),
            Err(GameError::UnknownAiPlayer("C".to_string()))
        );
    }

    #[test]
    fn ai_players_are_flagged() {
        let game = GameState::create_with_ai("g", 5, "cat", ["A", "B"], ["B", "B"]).unwrap();
        assert!(game.is_ai("B"));
        assert!(!game.is_ai("A"));
        assert_eq!(game.ai_players(), ["B"]);
    }

    #[test]
    fn commit_advances_turn_and_records_word() {
        let game = two_player_game();
        let board = game.board().with_letter(Position::new(1, 0), 'S');
        let next = game.commit(fake_move("A", "SHELL"), board, 5);

        assert_eq!(next.current_player(), "B");
        assert_eq!(next.score_of("A"), 5);
        assert!(next.is_word_used("shell"));
        assert_eq!(next.move_count(), 1);

        // The original value is untouched
        assert_eq!(game.current_player(), "A");
        assert!(!game.is_word_used("SHELL"));
    }

    #[test]
    fn turn_wraps_around() {
        let game = GameState::create("g", 5, "cat", ["A", "B", "C"]).unwrap();
        let mut state = game;
        for n in 1..=7 {
            let player = state.current_player().to_string();
            let board = state.board().clone();
            state = state.commit(fake_move(&player, &format!("W{n}")), board, 1);
            assert_eq!(state.current_player_index(), n % 3);
        }
    }

    #[test]
    fn rename_rewrites_history_and_scores() {
        let game = GameState::create_with_ai("g", 5, "hello", ["A", "B"], ["B"]).unwrap();
        let board = game.board().clone();
        let game = game.commit(fake_move("A", "SHELL"), board.clone(), 5);
        let game = game.commit(fake_move("B", "HELLS"), board, 5);

        let renamed = game.rename_player("B", "Bot").unwrap();
        assert_eq!(renamed.players(), ["A", "Bot"]);
        assert_eq!(renamed.ai_players(), ["Bot"]);
        assert_eq!(renamed.score_of("Bot"), 5);
        assert!(!renamed.scores().contains_key("B"));
        assert_eq!(renamed.moves()[1].player_id, "Bot");
        assert_eq!(renamed.moves()[0].player_id, "A");
        assert_eq!(renamed.current_player(), "A");
    }

    #[test]
    fn rename_errors() {
        let game = two_player_game();
        assert_eq!(
            game.rename_player("Z", "Y"),
            Err(GameError::UnknownPlayer("Z".to_string()))
        );
        assert_eq!(
            game.rename_player("A", "B"),
            Err(GameError::PlayerExists("B".to_string()))
        );
        assert_eq!(game.rename_player("A", ""), Err(GameError::EmptyPlayerId));
        assert_eq!(game.rename_player("A", "A").unwrap(), game);
    }

    #[test]
    fn leaders_share_top_score() {
        let game = GameState::create("g", 5, "cat", ["A", "B", "C"]).unwrap();
        assert_eq!(game.leaders(), vec!["A", "B", "C"]);

        let board = game.board().clone();
        let game = game.commit(fake_move("A", "X"), board.clone(), 3);
        let game = game.commit(fake_move("B", "Y"), board, 3);
        assert_eq!(game.leaders(), vec!["A", "B"]);
    }

    #[test]
    fn state_survives_json() {
        let game = two_player_game();
        let json = serde_json::to_string(&game).unwrap();
        assert!(json.contains("\"currentPlayerIndex\":0"));
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game);
    }

    fn tampered(edit: impl FnOnce(&mut serde_json::Value)) -> Result<GameState, serde_json::Error> {
        let game = GameState::create_with_ai("g", 5, "hello", ["A", "B"], ["B"]).unwrap();
        let mut value = serde_json::to_value(&game).unwrap();
        edit(&mut value);
        serde_json::from_value(value)
    }

    #[test]
    fn loading_checks_creation_rules() {
        use serde_json::json;

        assert!(tampered(|_| {}).is_ok());

        let cases: [(&str, fn(&mut serde_json::Value)); 7] = [
            ("no players", |v| v["players"] = json!([])),
            ("one player", |v| v["players"] = json!(["A"])),
            ("repeated player", |v| v["players"] = json!(["A", "A"])),
            ("blank player", |v| v["players"] = json!(["A", " "])),
            ("stray AI", |v| v["aiPlayers"] = json!(["C"])),
            ("turn past the end", |v| v["currentPlayerIndex"] = json!(7)),
            ("size mismatch", |v| v["size"] = json!(4)),
        ];
        for (name, edit) in cases {
            assert!(tampered(edit).is_err(), "{name}");
        }
    }

    #[test]
    fn loading_checks_the_board() {
        use serde_json::json;

        assert!(tampered(|v| v["board"]["size"] = json!(0)).is_err());
        assert!(tampered(|v| v["board"]["cells"] = json!([null, null])).is_err());
    }
}
