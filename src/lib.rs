//! Strictly Chess library - client side of a server-authoritative chess game
//!
//! The rules engine lives in a remote service. This crate captures square
//! clicks, turns them into move commands, and keeps a local copy of the
//! board in sync with what the service reports.
//!
//! # Architecture
//!
//! - **Controller**: two-click square selection producing [`MoveCommand`]s
//! - **Client**: fetch, move and reset round trips over a [`GameService`]
//! - **Board**: validated response schema and the [`BoardState`] it yields
//! - **TUI**: ratatui frontend wiring the two together
//!
//! # Example
//!
//! ```no_run
//! use strictly_chess::{ClientConfig, GameClient, HttpGameService, InteractionController};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::default();
//! let client = GameClient::new(HttpGameService::new(&config)?);
//! client.fetch_state().await;
//!
//! let mut controller = InteractionController::new();
//! controller.on_cell_click(6, 4)?;
//! if let Some(cmd) = controller.on_cell_click(4, 4)? {
//!     client.submit_move(cmd).await;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod client;
mod config;
mod controller;
mod error;
mod position;
mod service;
mod status;

pub mod tui;

// Crate-level exports - Errors
pub use error::{ClientError, ClientErrorKind, PositionError};

// Crate-level exports - Squares and moves
pub use position::{BOARD_SIZE, MoveCommand, Position, Promotion};

// Crate-level exports - Board state and wire schema
pub use board::{Board, BoardResponse, BoardState, Cell, ResetAck, Turn};

// Crate-level exports - Status messages
pub use status::MessageCategory;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, DEFAULT_CONFIG_FILE, SERVER_URL_ENV};

// Crate-level exports - Input capture
pub use controller::{InteractionController, Selection};

// Crate-level exports - Synchronization
pub use client::{ClientSnapshot, GameClient, MOVE_FAILED_MESSAGE, RESET_FAILED_MESSAGE};
pub use service::{GameService, HttpGameService};
