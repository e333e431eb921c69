//! Error types for the chess client.

use derive_more::{Display, Error};
use tracing::instrument;

/// Broad classification of a failed round trip to the game service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClientErrorKind {
    /// The request never completed (connection refused, timeout, ...).
    #[display("transport")]
    Transport,
    /// The service answered with a non-success HTTP status.
    #[display("status")]
    Status,
    /// The body could not be decoded as the expected JSON.
    #[display("decode")]
    Decode,
    /// The body decoded but violated the response schema.
    #[display("schema")]
    Schema,
}

/// Error raised at the network boundary, with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Client error ({}): {} at {}:{}", kind, message, file, line)]
pub struct ClientError {
    /// What went wrong.
    pub kind: ClientErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`ClientErrorKind::Schema`] error.
    #[track_caller]
    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Schema, message)
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_status() {
            ClientErrorKind::Status
        } else if err.is_decode() {
            ClientErrorKind::Decode
        } else {
            ClientErrorKind::Transport
        };
        Self::new(kind, err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(ClientErrorKind::Decode, err.to_string())
    }
}

/// A square coordinate or move token that does not name a board square.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Position error: {} at {}:{}", message, file, line)]
pub struct PositionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PositionError {
    /// Creates a new position error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
