//! Game persistence
//!
//! The engine itself is storage-agnostic; a [`GameStore`] keeps the latest
//! state of each game by id.

mod file;
mod memory;

pub use file::{JsonFileStore, read_game, write_game};
pub use memory::MemoryStore;

use crate::game::GameState;
use thiserror::Error;

/// Failure to read or write a stored game
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt game file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{0}' is not a valid game id")]
    InvalidId(String),
}

/// Keyed storage for game states
pub trait GameStore: Send + Sync {
    /// Latest state of game `id`, if stored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn get(&self, id: &str) -> Result<Option<GameState>, StoreError>;

    /// Insert or replace the state stored under `game.id()`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn upsert(&self, game: &GameState) -> Result<(), StoreError>;

    /// Remove game `id`; returns whether it was present
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
