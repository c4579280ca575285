//! Word-path search over the board
//!
//! Exact simple-path search through a required cell, with a bounded LRU
//! memoization layer for the move-validation hot path.

pub mod cache;
mod path;

pub use cache::LruCache;
pub use path::{
    CacheStats, DEFAULT_CACHE_CAPACITY, PathFinder, exists_path_for_word, find_path,
};
