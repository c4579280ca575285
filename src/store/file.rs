//! Directory of JSON files, one per game

use super::{GameStore, StoreError};
use crate::game::GameState;
use log::trace;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each game as `<dir>/<id>.json`
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never sees a half-written game.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

/// Read a single game file
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be read or is not a game.
pub fn read_game<P: AsRef<Path>>(path: P) -> Result<GameState, StoreError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Write a single game file as pretty JSON
///
/// # Errors
///
/// Returns [`StoreError`] if serialization or the write fails.
pub fn write_game<P: AsRef<Path>>(path: P, game: &GameState) -> Result<(), StoreError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(game).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    let io_err = |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    };
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}

impl GameStore for JsonFileStore {
    fn get(&self, id: &str) -> Result<Option<GameState>, StoreError> {
        let path = self.path_for(id)?;
        match read_game(&path) {
            Ok(game) => Ok(Some(game)),
            Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn upsert(&self, game: &GameState) -> Result<(), StoreError> {
        let path = self.path_for(game.id())?;
        write_game(&path, game)?;
        trace!("saved game {} to {}", game.id(), path.display());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::game::MoveRequest;

    fn temp_store(name: &str) -> JsonFileStore {
        let dir = std::env::temp_dir().join(format!("balda-store-{name}-{}", std::process::id()));
        JsonFileStore::open(dir).unwrap()
    }

    #[test]
    fn round_trip_through_disk() {
        let store = temp_store("round-trip");
        let game = GameState::create("g1", 5, "hello", ["A", "B"]).unwrap();

        assert!(store.get("g1").unwrap().is_none());
        store.upsert(&game).unwrap();
        assert_eq!(store.get("g1").unwrap(), Some(game));
        assert!(store.delete("g1").unwrap());
        assert!(!store.delete("g1").unwrap());

        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn stored_game_keeps_moves() {
        use crate::config::GameConfig;
        use crate::dictionary::WordSet;
        use crate::game::Referee;
        use crate::search::PathFinder;

        let store = temp_store("moves");
        let words = WordSet::new(["hello", "shell"]);
        let paths = PathFinder::default();
        let config = GameConfig::default();
        let game = GameState::create("g2", 5, "hello", ["A", "B"]).unwrap();
        let game = Referee::new(&words, &paths, &config)
            .apply_move(&game, &MoveRequest::new("A", Position::new(1, 0), "s", "shell"))
            .unwrap();

        store.upsert(&game).unwrap();
        let loaded = store.get("g2").unwrap().unwrap();
        assert_eq!(loaded.moves().len(), 1);
        assert_eq!(loaded.score_of("A"), 5);
        assert_eq!(loaded, game);

        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn rejects_path_like_ids() {
        let store = temp_store("ids");
        for id in ["", "../escape", "a/b", "dot.dot"] {
            assert!(matches!(store.get(id), Err(StoreError::InvalidId(_))));
        }
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn invalid_game_is_refused_on_load() {
        let store = temp_store("invalid");
        let game = GameState::create("g3", 5, "hello", ["A", "B"]).unwrap();
        let mut value = serde_json::to_value(&game).unwrap();
        value["players"] = serde_json::json!([]);
        value["currentPlayerIndex"] = serde_json::json!(7);
        fs::write(store.dir().join("g3.json"), value.to_string()).unwrap();

        assert!(matches!(store.get("g3"), Err(StoreError::Json { .. })));
        assert!(matches!(
            read_game(store.dir().join("g3.json")),
            Err(StoreError::Json { .. })
        ));
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let store = temp_store("corrupt");
        fs::write(store.dir().join("bad.json"), "{").unwrap();
        assert!(matches!(store.get("bad"), Err(StoreError::Json { .. })));
        fs::remove_dir_all(store.dir()).unwrap();
    }
}
