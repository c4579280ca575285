//! Move suggestions
//!
//! Enumerates every legal placement on the frontier, finds the dictionary
//! words each placement completes, and ranks them.

mod engine;

pub use engine::{Suggestion, SuggestionEngine, suggest_words};
