//! Dictionaries consumed by the engine
//!
//! The engine only needs word membership. Prefix search, the alphabet and
//! letter frequencies are optional capabilities: a dictionary without a
//! prefix index still works, and suggestion search falls back to a
//! depth-bounded enumeration.

mod embedded;
pub mod loader;
mod word_set;

pub use embedded::{WORDS, WORDS_COUNT};
pub use word_set::WordSet;

use crate::core::LATIN_ALPHABET;

/// Read-only word oracle
pub trait Dictionary: Send + Sync {
    /// True if the normalized `word` is a valid word
    fn contains(&self, word: &str) -> bool;

    /// Prefix search capability, if this dictionary supports it
    fn prefix_index(&self) -> Option<&dyn PrefixIndex> {
        None
    }

    /// Letters that can be placed on the board
    fn alphabet(&self) -> Vec<char> {
        LATIN_ALPHABET.to_vec()
    }

    /// How often `letter` occurs across the dictionary, if known
    fn letter_frequency(&self, _letter: char) -> Option<u32> {
        None
    }
}

/// Optional prefix-search capability of a [`Dictionary`]
pub trait PrefixIndex: Sync {
    /// True if some word starts with the normalized `prefix`
    fn has_prefix(&self, prefix: &str) -> bool;
}
