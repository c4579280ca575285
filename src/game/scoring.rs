//! Move scoring policies

use crate::core::word_points;
use serde::{Deserialize, Serialize};

/// How a successful move is scored
///
/// One policy applies for the whole game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// One point per letter
    #[default]
    Length,
    /// Sum of per-letter rarity points (1 for common letters up to 4)
    Rarity,
}

impl ScoringPolicy {
    /// Points earned for a normalized word
    #[must_use]
    pub fn score(self, word: &str) -> u32 {
        match self {
            Self::Length => word.chars().count() as u32,
            Self::Rarity => word_points(word),
        }
    }

    /// Parse a policy name, falling back to [`ScoringPolicy::Length`]
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "rarity" | "rare" | "weighted" => Self::Rarity,
            _ => Self::Length,
        }
    }
}
