//! Engine configuration
//!
//! Every field has a default, so a JSON config file only needs the values it
//! overrides.

use crate::game::ScoringPolicy;
use crate::search::DEFAULT_CACHE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Tunables shared by move validation and suggestion search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Shortest word the suggestion engine reports
    pub min_word_len: usize,
    /// Depth bound for suggestion search when the dictionary has no prefix index
    pub max_word_len: usize,
    /// Suggestions returned when the caller does not ask for a count
    pub default_suggestions: usize,
    /// Upper clamp for requested suggestion counts
    pub max_suggestions: usize,
    /// Path search memoization capacity
    pub cache_capacity: usize,
    pub scoring: ScoringPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_word_len: 3,
            max_word_len: 8,
            default_suggestions: 20,
            max_suggestions: 200,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            scoring: ScoringPolicy::Length,
        }
    }
}

/// Failure to read a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GameConfig {
    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Clamp a requested suggestion count into `[1, max_suggestions]`
    ///
    /// `None` selects `default_suggestions`.
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_suggestions)
            .clamp(1, self.max_suggestions.max(1))
    }
}
