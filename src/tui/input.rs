//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

use crate::{BOARD_SIZE, Position};

/// Moves the cursor one square for an arrow key, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let last = BOARD_SIZE as usize - 1;

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(last), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(last)),
        _ => (row, col),
    };

    Position::new(row, col).unwrap_or(cursor)
}
