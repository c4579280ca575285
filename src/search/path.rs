//! Simple-path word search
//!
//! Decides whether a word can be traced over orthogonally adjacent cells,
//! visiting no cell twice, with the path passing through a required cell.

use super::cache::LruCache;
use crate::core::{Board, Position, normalize_word};
use log::trace;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of memoized search results
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Find a path spelling `word` that passes through `must_include`
///
/// Returns the cells of the first path found, in word order, or `None` if no
/// such path exists. Every cell whose letter matches the word's first letter
/// is tried as a start.
///
/// # Examples
/// ```
/// use balda::core::{Board, Position};
/// use balda::search::find_path;
///
/// let board = Board::from_rows(&[".S...", ".CAT.", ".....", ".....", "....."]).unwrap();
/// let path = find_path(&board, "scat", Position::new(0, 1)).unwrap();
/// assert_eq!(path.first(), Some(&Position::new(0, 1)));
/// assert_eq!(path.len(), 4);
/// ```
#[must_use]
pub fn find_path(board: &Board, word: &str, must_include: Position) -> Option<Vec<Position>> {
    let letters: Vec<char> = normalize_word(word).chars().collect();
    let first = *letters.first()?;

    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut path = Vec::with_capacity(letters.len());

    for start in board.positions() {
        if board.get(start) != Some(first) {
            continue;
        }

        path.push(start);
        visited[start.row * size + start.col] = true;

        if extend(board, &letters, must_include, &mut visited, &mut path) {
            return Some(path);
        }

        visited[start.row * size + start.col] = false;
        path.pop();
    }

    None
}

/// Existence form of [`find_path`]
#[must_use]
pub fn exists_path_for_word(board: &Board, word: &str, must_include: Position) -> bool {
    find_path(board, word, must_include).is_some()
}

/// Depth-first extension of `path` by the next letter of `letters`
fn extend(
    board: &Board,
    letters: &[char],
    must_include: Position,
    visited: &mut [bool],
    path: &mut Vec<Position>,
) -> bool {
    if path.len() == letters.len() {
        return path.contains(&must_include);
    }

    let size = board.size();
    let Some(&current) = path.last() else {
        return false;
    };
    let next_letter = letters[path.len()];

    for next in board.neighbors(current) {
        let index = next.row * size + next.col;
        if visited[index] || board.get(next) != Some(next_letter) {
            continue;
        }

        visited[index] = true;
        path.push(next);

        if extend(board, letters, must_include, visited, path) {
            return true;
        }

        path.pop();
        visited[index] = false;
    }

    false
}

/// Snapshot of cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizing front end for [`exists_path_for_word`]
///
/// Results are keyed by the full board content, the normalized word and the
/// required position, so a hit always equals a fresh search. The cache is
/// shared behind a mutex and bounded with strict LRU eviction.
pub struct PathFinder {
    cache: Mutex<LruCache<String, bool>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PathFinder {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache key: board encoding, word and required cell
    #[must_use]
    pub fn cache_key(board: &Board, word: &str, must_include: Position) -> String {
        format!(
            "{}|{}|{},{}",
            board.cache_key(),
            normalize_word(word),
            must_include.row,
            must_include.col
        )
    }

    /// Cached [`exists_path_for_word`]
    pub fn exists_path_for_word(&self, board: &Board, word: &str, must_include: Position) -> bool {
        let key = Self::cache_key(board, word, must_include);

        if let Some(found) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("path cache hit for {key}");
            return found;
        }

        // Search without holding the lock; a racing thread computes the same answer
        self.misses.fetch_add(1, Ordering::Relaxed);
        let found = exists_path_for_word(board, word, must_include);
        trace!("path cache miss for {key}: {found}");

        self.lock().insert(key, found);
        found
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.lock().len(),
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, bool>> {
        // A poisoned cache still holds valid entries; keep using it
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
