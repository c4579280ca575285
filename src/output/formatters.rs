//! Formatting utilities for terminal output

use crate::core::{Board, EMPTY_CELL};

/// Width of the widest index on a board of `size`
fn index_width(size: usize) -> usize {
    size.saturating_sub(1).to_string().len()
}

/// Column numbers aligned with [`format_board_row`]
#[must_use]
pub fn column_header(size: usize) -> String {
    let width = index_width(size);
    let cols: Vec<String> = (0..size).map(|c| format!("{c:>width$}")).collect();
    format!("{:>width$}  {}", "", cols.join(" "))
}

/// One board row prefixed with its row number
#[must_use]
pub fn format_board_row(board: &Board, row: usize) -> String {
    let width = index_width(board.size());
    let cells: Vec<String> = (0..board.size())
        .map(|col| {
            let ch = board
                .get(crate::core::Position::new(row, col))
                .unwrap_or(EMPTY_CELL);
            format!("{ch:>width$}")
        })
        .collect();
    format!("{row:>width$}  {}", cells.join(" "))
}

/// Board with row and column numbers
#[must_use]
pub fn format_board(board: &Board) -> String {
    let mut lines = vec![column_header(board.size())];
    lines.extend((0..board.size()).map(|row| format_board_row(board, row)));
    lines.join("\n")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
