//! Square letter grid
//!
//! The board is a flat row-major array of optional letters. Boards are plain
//! values: a tentative placement clones the board, so the original is never
//! seen half-modified.

use super::letters::normalize_word;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest supported board side
pub const MIN_BOARD_SIZE: usize = 3;

/// Sentinel used for empty cells in text renderings and cache keys
pub const EMPTY_CELL: char = '.';

/// A cell coordinate, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors raised while building a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {size} is below the minimum of {MIN_BOARD_SIZE}")]
    TooSmall { size: usize },
    #[error("base word is empty")]
    EmptyBaseWord,
    #[error("base word '{0}' must contain only letters")]
    InvalidBaseWord(String),
    #[error("base word '{word}' has {len} letters but the board is only {size} wide")]
    BaseWordTooLong { word: String, len: usize, size: usize },
    #[error("row {row} has {len} cells, expected {size}")]
    RaggedRow { row: usize, len: usize, size: usize },
    #[error("board of size {size} has {cells} cells")]
    CellCount { size: usize, cells: usize },
    #[error("cell holds '{0}', which is not a letter")]
    InvalidCell(char),
}

/// N×N grid of optional uppercase letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Option<char>>,
}

/// Board as it appears on disk, before validation
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Option<char>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut board = Self::new(raw.size)?;
        if raw.cells.len() != board.cells.len() {
            return Err(BoardError::CellCount {
                size: raw.size,
                cells: raw.cells.len(),
            });
        }
        if let Some(bad) = raw.cells.iter().flatten().find(|c| !c.is_alphabetic()) {
            return Err(BoardError::InvalidCell(*bad));
        }
        board.cells = raw.cells;
        Ok(board)
    }
}

impl Board {
    /// Create an empty `size`×`size` board
    ///
    /// # Errors
    /// Returns [`BoardError::TooSmall`] if `size` is below [`MIN_BOARD_SIZE`].
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::TooSmall { size });
        }

        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Build a board from text rows, `.` marking empty cells
    ///
    /// Intended for fixtures and saved puzzles.
    ///
    /// # Errors
    /// Returns [`BoardError::TooSmall`] if there are fewer than
    /// [`MIN_BOARD_SIZE`] rows, [`BoardError::RaggedRow`] if a row's length
    /// differs from the row count, or [`BoardError::InvalidCell`] for a
    /// character that is neither a letter nor `.`.
    ///
    /// # Examples
    /// ```
    /// use balda::core::{Board, Position};
    ///
    /// let board = Board::from_rows(&["...", "CAT", "..."]).unwrap();
    /// assert_eq!(board.get(Position::new(1, 0)), Some('C'));
    /// assert_eq!(board.get(Position::new(0, 0)), None);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let mut board = Self::new(rows.len())?;

        for (row, line) in rows.iter().enumerate() {
            let letters: Vec<char> = line.trim().chars().collect();
            if letters.len() != board.size {
                return Err(BoardError::RaggedRow {
                    row,
                    len: letters.len(),
                    size: board.size,
                });
            }

            for (col, ch) in letters.into_iter().enumerate() {
                if ch != EMPTY_CELL && !ch.is_alphabetic() {
                    return Err(BoardError::InvalidCell(ch));
                }
                if ch != EMPTY_CELL {
                    board.set(Position::new(row, col), ch.to_uppercase().next().unwrap_or(ch));
                }
            }
        }

        Ok(board)
    }

    /// Side length
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Pure bounds check for a board of side `size`
    #[inline]
    #[must_use]
    pub const fn is_inside(size: usize, pos: Position) -> bool {
        pos.row < size && pos.col < size
    }

    #[inline]
    const fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Letter at `pos`, or `None` if the cell is empty or outside the board
    #[inline]
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<char> {
        if Self::is_inside(self.size, pos) {
            self.cells.get(self.index(pos)).copied().flatten()
        } else {
            None
        }
    }

    /// Write a letter into a cell
    ///
    /// Out-of-bounds positions are ignored; callers check [`Board::can_place`]
    /// first.
    fn set(&mut self, pos: Position, letter: char) {
        if Self::is_inside(self.size, pos) {
            let index = self.index(pos);
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = Some(letter);
            }
        }
    }

    /// True iff the cell is inside the board and empty
    #[must_use]
    pub fn can_place(&self, pos: Position) -> bool {
        Self::is_inside(self.size, pos) && matches!(self.cells.get(self.index(pos)), Some(None))
    }

    /// Copy of this board with `letter` written at `pos`
    ///
    /// This is the tentative placement used by move validation and
    /// suggestion search; `self` is left untouched.
    #[must_use]
    pub fn with_letter(&self, pos: Position, letter: char) -> Self {
        let mut board = self.clone();
        board.set(pos, letter);
        board
    }

    /// Write `word` centered on the middle row
    ///
    /// Starts at column `(size - len) / 2` of row `size / 2`.
    ///
    /// # Errors
    /// Fails if the normalized word is empty, contains non-letters, or is
    /// longer than the board is wide.
    pub fn place_base_word(&mut self, word: &str) -> Result<(), BoardError> {
        let word = normalize_word(word);
        let letters: Vec<char> = word.chars().collect();

        if letters.is_empty() {
            return Err(BoardError::EmptyBaseWord);
        }
        if !letters.iter().all(|c| c.is_alphabetic()) {
            return Err(BoardError::InvalidBaseWord(word));
        }
        if letters.len() > self.size {
            return Err(BoardError::BaseWordTooLong {
                len: letters.len(),
                word,
                size: self.size,
            });
        }

        let row = self.size / 2;
        let start_col = (self.size - letters.len()) / 2;
        for (offset, letter) in letters.into_iter().enumerate() {
            self.set(Position::new(row, start_col + offset), letter);
        }

        Ok(())
    }

    /// Invoke `visit` once per orthogonal in-bounds neighbor of `pos`
    ///
    /// Order is up, down, left, right.
    pub fn for_each_neighbor(size: usize, pos: Position, mut visit: impl FnMut(Position)) {
        if pos.row > 0 {
            visit(Position::new(pos.row - 1, pos.col));
        }
        if pos.row + 1 < size {
            visit(Position::new(pos.row + 1, pos.col));
        }
        if pos.col > 0 {
            visit(Position::new(pos.row, pos.col - 1));
        }
        if pos.col + 1 < size {
            visit(Position::new(pos.row, pos.col + 1));
        }
    }

    /// Orthogonal in-bounds neighbors of `pos`
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let mut out = Vec::with_capacity(4);
        Self::for_each_neighbor(self.size, pos, |n| out.push(n));
        out
    }

    /// True iff any orthogonal neighbor of `pos` holds a letter
    #[must_use]
    pub fn is_adjacent_to_existing(&self, pos: Position) -> bool {
        let mut adjacent = false;
        Self::for_each_neighbor(self.size, pos, |n| {
            adjacent |= self.get(n).is_some();
        });
        adjacent
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size * size).map(move |i| Position::new(i / size, i % size))
    }

    /// Positions currently holding a letter, row-major
    #[must_use]
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.get(p).is_some()).collect()
    }

    /// Empty cells touching at least one letter: the legal placement targets
    #[must_use]
    pub fn frontier(&self) -> Vec<Position> {
        self.positions()
            .filter(|&p| self.can_place(p) && self.is_adjacent_to_existing(p))
            .collect()
    }

    /// True when no empty cell remains
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Flat encoding of size and every cell, used as part of cache keys
    #[must_use]
    pub fn cache_key(&self) -> String {
        let mut key = String::with_capacity(self.cells.len() + 4);
        key.push_str(&self.size.to_string());
        key.push('|');
        key.extend(self.cells.iter().map(|c| c.unwrap_or(EMPTY_CELL)));
        key
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.size).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.unwrap_or(EMPTY_CELL))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.size(), 5);
        assert!(board.occupied_positions().is_empty());
        assert!(!board.is_full());
    }

    #[test]
    fn board_below_minimum_is_rejected() {
        assert_eq!(Board::new(2), Err(BoardError::TooSmall { size: 2 }));
        assert_eq!(Board::new(0), Err(BoardError::TooSmall { size: 0 }));
        assert!(Board::new(3).is_ok());
        assert!(Board::new(4).is_ok());
    }

    #[test]
    fn is_inside_checks_bounds() {
        assert!(Board::is_inside(5, Position::new(0, 0)));
        assert!(Board::is_inside(5, Position::new(4, 4)));
        assert!(!Board::is_inside(5, Position::new(5, 0)));
        assert!(!Board::is_inside(5, Position::new(0, 5)));
    }

    #[test]
    fn base_word_is_centered() {
        let mut board = Board::new(5).unwrap();
        board.place_base_word("cat").unwrap();
        assert_eq!(board.to_string(), ".....\n.....\n.CAT.\n.....\n.....");

        let mut board = Board::new(4).unwrap();
        board.place_base_word("ab").unwrap();
        assert_eq!(board.get(Position::new(2, 1)), Some('A'));
        assert_eq!(board.get(Position::new(2, 2)), Some('B'));
    }

    #[test]
    fn base_word_filling_the_row() {
        let mut board = Board::new(5).unwrap();
        board.place_base_word(" hello ").unwrap();
        assert_eq!(board.to_string(), ".....\n.....\nHELLO\n.....\n.....");
    }

    #[test]
    fn base_word_errors() {
        let mut board = Board::new(3).unwrap();
        assert_eq!(
            board.place_base_word("four"),
            Err(BoardError::BaseWordTooLong {
                word: "FOUR".to_string(),
                len: 4,
                size: 3
            })
        );
        assert_eq!(board.place_base_word("  "), Err(BoardError::EmptyBaseWord));
        assert!(matches!(
            board.place_base_word("a1"),
            Err(BoardError::InvalidBaseWord(_))
        ));
        assert!(board.occupied_positions().is_empty());
    }

    #[test]
    fn neighbor_counts() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.neighbors(Position::new(0, 0)).len(), 2);
        assert_eq!(board.neighbors(Position::new(4, 4)).len(), 2);
        assert_eq!(board.neighbors(Position::new(0, 2)).len(), 3);
        assert_eq!(board.neighbors(Position::new(2, 4)).len(), 3);
        assert_eq!(board.neighbors(Position::new(2, 2)).len(), 4);
    }

    #[test]
    fn neighbors_are_orthogonal() {
        let board = Board::new(3).unwrap();
        let mut neighbors = board.neighbors(Position::new(1, 1));
        neighbors.sort();
        assert_eq!(
            neighbors,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 1)
            ]
        );
    }

    #[test]
    fn can_place_requires_empty_inside_cell() {
        let board = Board::from_rows(&["...", "CAT", "..."]).unwrap();
        assert!(board.can_place(Position::new(0, 0)));
        assert!(!board.can_place(Position::new(1, 1)));
        assert!(!board.can_place(Position::new(3, 0)));
    }

    #[test]
    fn adjacency_to_existing_letters() {
        let board = Board::from_rows(&[".....", ".....", ".CAT.", ".....", "....."]).unwrap();
        assert!(board.is_adjacent_to_existing(Position::new(1, 1)));
        assert!(board.is_adjacent_to_existing(Position::new(2, 0)));
        assert!(!board.is_adjacent_to_existing(Position::new(0, 0)));
        assert!(!board.is_adjacent_to_existing(Position::new(1, 0)));
    }

    #[test]
    fn with_letter_leaves_original_untouched() {
        let board = Board::from_rows(&["...", "CAT", "..."]).unwrap();
        let placed = board.with_letter(Position::new(0, 0), 'S');
        assert_eq!(placed.get(Position::new(0, 0)), Some('S'));
        assert_eq!(board.get(Position::new(0, 0)), None);
    }

    #[test]
    fn frontier_lists_adjacent_empty_cells() {
        let board = Board::from_rows(&["...", ".A.", "..."]).unwrap();
        assert_eq!(
            board.frontier(),
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 1)
            ]
        );
    }

    #[test]
    fn full_board_detection() {
        let board = Board::from_rows(&["ABC", "DEF", "GHI"]).unwrap();
        assert!(board.is_full());
        assert!(board.frontier().is_empty());
    }

    #[test]
    fn cache_key_distinguishes_boards() {
        let a = Board::from_rows(&["...", "CAT", "..."]).unwrap();
        let b = a.with_letter(Position::new(0, 0), 'S');
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), "3|...CAT...");
    }

    #[test]
    fn deserialized_board_is_validated() {
        let board = Board::from_rows(&["...", "CAT", "..."]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        for bad in [
            r#"{"size":0,"cells":[]}"#,
            r#"{"size":3,"cells":[null,null]}"#,
            r#"{"size":3,"cells":[null,null,null,null,".",null,null,null,null]}"#,
        ] {
            assert!(serde_json::from_str::<Board>(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert_eq!(
            Board::from_rows(&["...", "CATS", "..."]),
            Err(BoardError::RaggedRow {
                row: 1,
                len: 4,
                size: 3
            })
        );
        assert!(Board::from_rows(&["..", ".."]).is_err());
        assert_eq!(
            Board::from_rows(&["...", "C|T", "..."]),
            Err(BoardError::InvalidCell('|'))
        );
    }
}
