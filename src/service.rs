//! Game service
//!
//! Wraps the engine with storage, per-game write serialization and change
//! notification. Each write on a game id runs under that id's mutex, so two
//! moves on the same game can never both validate against the same state.

use crate::ai::Strategy;
use crate::config::GameConfig;
use crate::dictionary::Dictionary;
use crate::game::{GameError, GameState, MoveError, MoveRequest, Referee};
use crate::search::{CacheStats, PathFinder};
use crate::store::{GameStore, StoreError};
use crate::suggest::Suggestion;
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Failure of a service operation
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no game with id '{0}'")]
    UnknownGame(String),
    #[error("a game with id '{0}' already exists")]
    GameExists(String),
    #[error("it is not an AI player's turn in game '{0}'")]
    NotAiTurn(String),
    #[error("no legal move is available in game '{0}'")]
    NoMoveAvailable(String),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parameters of a new game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub id: String,
    pub size: usize,
    pub base_word: String,
    pub players: Vec<String>,
    pub ai_players: Vec<String>,
}

/// Store-backed game host
pub struct GameService<S: GameStore> {
    store: S,
    dictionary: Arc<dyn Dictionary>,
    paths: PathFinder,
    config: GameConfig,
    locks: Mutex<FxHashMap<String, Arc<Mutex<()>>>>,
    subscribers: Mutex<FxHashMap<String, Vec<Sender<GameState>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S, dictionary: Arc<dyn Dictionary>, config: GameConfig) -> Self {
        Self {
            store,
            dictionary,
            paths: PathFinder::new(config.cache_capacity),
            config,
            locks: Mutex::new(FxHashMap::default()),
            subscribers: Mutex::new(FxHashMap::default()),
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Path cache counters
    pub fn path_stats(&self) -> CacheStats {
        self.paths.stats()
    }

    fn referee(&self) -> Referee<'_> {
        Referee::new(self.dictionary.as_ref(), &self.paths, &self.config)
    }

    /// Run `work` under the write lock of game `id`
    ///
    /// The lock entry lives only while some caller holds or waits on it, so
    /// the map never outgrows the number of writes in flight.
    fn with_game_lock<T>(&self, id: &str, work: impl FnOnce() -> T) -> T {
        let entry = Arc::clone(lock(&self.locks).entry(id.to_string()).or_default());
        let result = {
            let _held = lock(&entry);
            work()
        };
        drop(entry);

        // Clones are only taken under the map lock, so a count of one means
        // nobody else can be waiting on this mutex
        let mut locks = lock(&self.locks);
        if locks.get(id).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(id);
        }
        result
    }

    /// Create and store a new game
    ///
    /// # Errors
    ///
    /// [`ServiceError::GameExists`] if the id is taken, [`ServiceError::Game`]
    /// for invalid parameters.
    pub fn create_game(&self, new: &NewGame) -> Result<GameState, ServiceError> {
        self.with_game_lock(&new.id, || -> Result<GameState, ServiceError> {
            if self.store.get(&new.id)?.is_some() {
                return Err(ServiceError::GameExists(new.id.clone()));
            }

            let game = GameState::create_with_ai(
                new.id.as_str(),
                new.size,
                &new.base_word,
                new.players.iter().cloned(),
                new.ai_players.iter().cloned(),
            )?;
            self.store.upsert(&game)?;
            debug!(
                "created game {} ({}x{}, base word {})",
                game.id(),
                game.size(),
                game.size(),
                game.base_word()
            );
            Ok(game)
        })
    }

    /// Current state of a game
    ///
    /// # Errors
    ///
    /// [`ServiceError::UnknownGame`] if no such game is stored.
    pub fn get_game(&self, id: &str) -> Result<GameState, ServiceError> {
        self.store
            .get(id)?
            .ok_or_else(|| ServiceError::UnknownGame(id.to_string()))
    }

    /// Remove a game and drop its subscribers
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn delete_game(&self, id: &str) -> Result<bool, ServiceError> {
        self.with_game_lock(id, || -> Result<bool, ServiceError> {
            let removed = self.store.delete(id)?;
            lock(&self.subscribers).remove(id);
            Ok(removed)
        })
    }

    /// Validate and apply a move, then notify subscribers
    ///
    /// # Errors
    ///
    /// [`ServiceError::Move`] carries the rejection reason; the stored game
    /// is unchanged in that case.
    pub fn submit_move(&self, id: &str, request: &MoveRequest) -> Result<GameState, ServiceError> {
        self.update(id, |game| Ok(self.referee().apply_move(game, request)?))
    }

    /// Let the AI play for the current player
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotAiTurn`] if the player to move is human and
    /// [`ServiceError::NoMoveAvailable`] if the strategy finds nothing.
    pub fn play_ai<T: Strategy + ?Sized>(
        &self,
        id: &str,
        strategy: &T,
    ) -> Result<GameState, ServiceError> {
        self.update(id, |game| {
            if !game.is_ai(game.current_player()) {
                return Err(ServiceError::NotAiTurn(id.to_string()));
            }
            let referee = self.referee();
            let request = referee
                .ai_move(game, strategy)
                .ok_or_else(|| ServiceError::NoMoveAvailable(id.to_string()))?;
            Ok(referee.apply_move(game, &request)?)
        })
    }

    /// Rename a player, keeping their score and move history
    ///
    /// # Errors
    ///
    /// [`ServiceError::Game`] for an unknown or conflicting name.
    pub fn rename_player(&self, id: &str, old: &str, new: &str) -> Result<GameState, ServiceError> {
        self.update(id, |game| Ok(game.rename_player(old, new)?))
    }

    /// Ranked suggestions for the player to move
    ///
    /// # Errors
    ///
    /// [`ServiceError::UnknownGame`] if no such game is stored.
    pub fn suggest(&self, id: &str, limit: Option<usize>) -> Result<Vec<Suggestion>, ServiceError> {
        let game = self.get_game(id)?;
        Ok(self.referee().suggest(&game, limit))
    }

    /// Receive every state committed to game `id` from now on
    pub fn subscribe(&self, id: &str) -> Receiver<GameState> {
        let (tx, rx) = mpsc::channel();
        lock(&self.subscribers)
            .entry(id.to_string())
            .or_default()
            .push(tx);
        rx
    }

    /// Load, transform and store one game under its write lock
    fn update<F>(&self, id: &str, change: F) -> Result<GameState, ServiceError>
    where
        F: FnOnce(&GameState) -> Result<GameState, ServiceError>,
    {
        self.with_game_lock(id, || -> Result<GameState, ServiceError> {
            let current = self.get_game(id)?;
            let next = change(&current)?;
            self.store.upsert(&next)?;
            self.publish(&next);
            Ok(next)
        })
    }

    fn publish(&self, game: &GameState) {
        let mut subscribers = lock(&self.subscribers);
        if let Some(senders) = subscribers.get_mut(game.id()) {
            senders.retain(|tx| tx.send(game.clone()).is_ok());
            trace!(
                "published game {} to {} subscribers",
                game.id(),
                senders.len()
            );
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self, id: &str) -> usize {
        lock(&self.subscribers).get(id).map_or(0, Vec::len)
    }

    #[cfg(test)]
    fn lock_count(&self) -> usize {
        lock(&self.locks).len()
    }
}
