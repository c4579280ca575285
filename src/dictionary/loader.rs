//! Word list loading utilities
//!
//! Provides functions to load word lists from files or use the embedded list.

use super::{WORDS, WordSet};
use log::debug;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Failure to load a word list
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("word list {0} contains no usable words")]
    Empty(String),
}

/// Load a word set from a file with one word per line
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns [`DictionaryError::Io`] if the file cannot be read and
/// [`DictionaryError::Empty`] if nothing usable remains.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<WordSet, DictionaryError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let words = words_from_text(&content);
    if words.is_empty() {
        return Err(DictionaryError::Empty(path.display().to_string()));
    }

    debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Parse a word set from text with one word per line
#[must_use]
pub fn words_from_text(content: &str) -> WordSet {
    WordSet::new(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}

/// Word set built from the word list compiled into the binary
///
/// # Examples
/// ```
/// use balda::dictionary::{Dictionary, loader::embedded_words};
///
/// let words = embedded_words();
/// assert!(words.contains("hello"));
/// ```
#[must_use]
pub fn embedded_words() -> WordSet {
    WordSet::new(WORDS)
}

/// Resolve a word list argument: `"embedded"` or a file path
///
/// # Errors
///
/// Propagates [`load_from_file`] errors for file paths.
pub fn resolve(source: &str) -> Result<WordSet, DictionaryError> {
    match source {
        "embedded" | "" => Ok(embedded_words()),
        path => load_from_file(path),
    }
}
