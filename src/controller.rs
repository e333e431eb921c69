//! Interaction controller: turns pairs of square clicks into move commands.

use tracing::{debug, instrument};

use crate::{MoveCommand, Position, PositionError};

/// Transient selection state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// No square selected.
    #[default]
    Idle,
    /// One square selected, waiting for the destination click.
    Pending(Position),
}

/// Captures square clicks and emits a [`MoveCommand`] for every second click.
///
/// The controller never judges legality. Colour, turn and even a repeated
/// click on the same square are all passed through to the rules service.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    selection: Selection,
}

impl InteractionController {
    /// Creates a controller in the [`Selection::Idle`] state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Whether `pos` should be drawn as selected.
    pub fn is_selected(&self, pos: Position) -> bool {
        self.selection == Selection::Pending(pos)
    }

    /// Handles a click on grid coordinates.
    ///
    /// Out-of-range coordinates are rejected and leave the selection as it was.
    #[instrument(skip(self))]
    pub fn on_cell_click(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<Option<MoveCommand>, PositionError> {
        let pos = Position::new(row, col)?;
        Ok(self.on_square_click(pos))
    }

    /// Handles a click on a known square.
    #[instrument(skip(self), fields(square = %pos))]
    pub fn on_square_click(&mut self, pos: Position) -> Option<MoveCommand> {
        match self.selection {
            Selection::Idle => {
                debug!("Square selected");
                self.selection = Selection::Pending(pos);
                None
            }
            Selection::Pending(from) => {
                let cmd = MoveCommand::new(from, pos);
                debug!(token = %cmd, "Move command emitted");
                self.selection = Selection::Idle;
                Some(cmd)
            }
        }
    }
}
