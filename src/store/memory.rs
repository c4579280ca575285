//! In-process store

use super::{GameStore, StoreError};
use crate::game::GameState;
use rustc_hash::FxHashMap;
use std::sync::{PoisonError, RwLock};

/// Games held in a map behind a read-write lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<FxHashMap<String, GameState>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<GameState>, StoreError> {
        let games = self.games.read().unwrap_or_else(PoisonError::into_inner);
        Ok(games.get(id).cloned())
    }

    fn upsert(&self, game: &GameState) -> Result<(), StoreError> {
        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        games.insert(game.id().to_string(), game.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        Ok(games.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_get_delete() {
        let store = MemoryStore::new();
        let game = GameState::create("g1", 5, "hello", ["A", "B"]).unwrap();

        assert!(store.get("g1").unwrap().is_none());
        store.upsert(&game).unwrap();
        assert_eq!(store.get("g1").unwrap(), Some(game.clone()));
        assert_eq!(store.len(), 1);

        let renamed = game.rename_player("A", "Alice").unwrap();
        store.upsert(&renamed).unwrap();
        assert_eq!(store.get("g1").unwrap(), Some(renamed));
        assert_eq!(store.len(), 1);

        assert!(store.delete("g1").unwrap());
        assert!(!store.delete("g1").unwrap());
        assert!(store.is_empty());
    }
}
