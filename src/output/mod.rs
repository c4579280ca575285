//! Terminal output formatting
//!
//! Display utilities for the game board, suggestions and statistics.

pub mod display;
pub mod formatters;

pub use display::{
    print_game, print_game_over, print_selfplay_statistics, print_suggest_report,
    print_suggestions,
};
