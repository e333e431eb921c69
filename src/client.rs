//! Game client: keeps the local view in sync with the rules service.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::{BoardState, GameService, MessageCategory, MoveCommand};

/// Message shown when a submitted move could not be delivered.
pub const MOVE_FAILED_MESSAGE: &str = "Move failed. Try again.";

/// Message shown when a reset could not be delivered.
pub const RESET_FAILED_MESSAGE: &str = "Reset failed. Try again.";

/// What the display renders: the last good state and the status message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSnapshot {
    /// Last state received, `None` until the first successful fetch.
    pub board: Option<BoardState>,
    /// Human-readable status message, empty when there is nothing to say.
    pub message: String,
}

impl ClientSnapshot {
    /// Display category of the current message.
    pub fn category(&self) -> MessageCategory {
        MessageCategory::classify(&self.message)
    }
}

/// Synchronizes local display state with the rules service.
///
/// Cloning is cheap and every clone shares the same state, so each operation
/// can run on its own task. Nothing serializes those tasks: whichever
/// response arrives last wins, even if it answers an older request.
/// Failures are absorbed here and never returned to the caller.
pub struct GameClient<S> {
    service: Arc<S>,
    state: Arc<watch::Sender<ClientSnapshot>>,
}

impl<S> Clone for GameClient<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: GameService> GameClient<S> {
    /// Creates a client with no board and an empty message.
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(ClientSnapshot::default());
        Self {
            service: Arc::new(service),
            state: Arc::new(state),
        }
    }

    /// The underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ClientSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes. The receiver sees every replacement.
    pub fn subscribe(&self) -> watch::Receiver<ClientSnapshot> {
        self.state.subscribe()
    }

    /// Fetches the current state. A failure is logged and otherwise ignored:
    /// board and message stay as they were.
    #[instrument(skip(self))]
    pub async fn fetch_state(&self) {
        match self.service.fetch_board().await {
            Ok(board) => {
                debug!(turn = %board.turn(), "Fetched board");
                self.replace(board);
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch board, keeping stale state");
            }
        }
    }

    /// Submits a move. On failure the board is kept and the message becomes
    /// [`MOVE_FAILED_MESSAGE`].
    #[instrument(skip(self), fields(token = %cmd))]
    pub async fn submit_move(&self, cmd: MoveCommand) {
        match self.service.submit_move(&cmd).await {
            Ok(board) => {
                info!(turn = %board.turn(), message = ?board.message(), "Move answered");
                self.replace(board);
            }
            Err(e) => {
                warn!(error = %e, "Move failed");
                self.set_message(MOVE_FAILED_MESSAGE);
            }
        }
    }

    /// Resets the game, then fetches the fresh board. On failure the message
    /// becomes [`RESET_FAILED_MESSAGE`] and no fetch follows.
    #[instrument(skip(self))]
    pub async fn reset_game(&self) {
        match self.service.reset().await {
            Ok(()) => {
                info!("Game reset");
                self.set_message("");
                self.fetch_state().await;
            }
            Err(e) => {
                warn!(error = %e, "Reset failed");
                self.set_message(RESET_FAILED_MESSAGE);
            }
        }
    }

    fn replace(&self, board: BoardState) {
        let message = board.message().unwrap_or_default().to_string();
        self.state.send_replace(ClientSnapshot {
            board: Some(board),
            message,
        });
    }

    fn set_message(&self, message: &str) {
        self.state.send_modify(|snapshot| {
            snapshot.message = message.to_string();
        });
    }
}
