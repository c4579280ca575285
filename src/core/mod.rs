//! Core domain types for Balda
//!
//! The board model and letter handling. Everything here is pure and
//! independent of dictionaries, games and search.

mod board;
mod letters;

pub use board::{Board, BoardError, EMPTY_CELL, MIN_BOARD_SIZE, Position};
pub use letters::{
    DEFAULT_LETTER_POINTS, LATIN_ALPHABET, letter_points, normalize_letter, normalize_word,
    word_points,
};
