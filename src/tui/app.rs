//! Application state and input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::{InteractionController, MoveCommand, Position};

use super::input::move_cursor;
use super::ui::ScreenLayout;

/// Work the event loop must carry out for an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a move to the service.
    Submit(MoveCommand),
    /// Start a new game.
    Reset,
    /// Fetch the board again.
    Refresh,
    /// Leave the application.
    Quit,
}

/// Main application state: the click controller and the keyboard cursor.
#[derive(Debug)]
pub struct App {
    controller: InteractionController,
    cursor: Position,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new application with the cursor on e2.
    pub fn new() -> Self {
        Self {
            controller: InteractionController::new(),
            cursor: Position::E2,
        }
    }

    /// The click controller.
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Char('f') => Some(Action::Refresh),
            KeyCode::Enter | KeyCode::Char(' ') => self.click(self.cursor),
            code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
                self.cursor = move_cursor(self.cursor, code);
                None
            }
            _ => None,
        }
    }

    /// Handles a mouse event; only left-button presses on a square count.
    pub fn handle_mouse(&mut self, event: MouseEvent, layout: &ScreenLayout) -> Option<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        let pos = layout.square_at(event.column, event.row)?;
        self.cursor = pos;
        self.click(pos)
    }

    fn click(&mut self, pos: Position) -> Option<Action> {
        debug!(square = %pos, "Square clicked");
        self.controller.on_square_click(pos).map(Action::Submit)
    }
}
