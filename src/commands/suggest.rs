//! Suggest moves for a saved game

use crate::config::GameConfig;
use crate::dictionary::Dictionary;
use crate::game::{GameState, Referee};
use crate::search::PathFinder;
use crate::store::{StoreError, read_game};
use crate::suggest::Suggestion;
use serde::Serialize;
use std::path::Path;

/// Suggestions for the player to move in one game
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestReport {
    pub game_id: String,
    pub player: String,
    pub suggestions: Vec<Suggestion>,
}

/// Ranked suggestions for an in-memory game
#[must_use]
pub fn suggest_for_game(
    game: &GameState,
    dictionary: &dyn Dictionary,
    config: &GameConfig,
    limit: Option<usize>,
) -> SuggestReport {
    let paths = PathFinder::new(config.cache_capacity);
    let referee = Referee::new(dictionary, &paths, config);

    SuggestReport {
        game_id: game.id().to_string(),
        player: game.current_player().to_string(),
        suggestions: referee.suggest(game, limit),
    }
}

/// Load a game file and rank the moves available to the player to move
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be read as a game.
pub fn suggest_for_file<P: AsRef<Path>>(
    path: P,
    dictionary: &dyn Dictionary,
    config: &GameConfig,
    limit: Option<usize>,
) -> Result<SuggestReport, StoreError> {
    let game = read_game(path)?;
    Ok(suggest_for_game(&game, dictionary, config, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordSet;
    use crate::store::write_game;

    #[test]
    fn report_for_saved_game() {
        let words = WordSet::new(["hello", "shell", "hells"]);
        let game = GameState::create("saved", 5, "hello", ["A", "B"]).unwrap();
        let path = std::env::temp_dir().join(format!("balda-suggest-{}.json", std::process::id()));
        write_game(&path, &game).unwrap();

        let report = suggest_for_file(&path, &words, &GameConfig::default(), Some(3)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(report.game_id, "saved");
        assert_eq!(report.player, "A");
        assert_eq!(report.suggestions.len(), 3);
        assert!(report.suggestions.iter().all(|s| s.word.len() == 5));
    }

    #[test]
    fn missing_file_is_an_error() {
        let words = WordSet::new(["cat"]);
        let result = suggest_for_file("/no/such/game.json", &words, &GameConfig::default(), None);
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
