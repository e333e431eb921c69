//! Display classification of status messages from the rules engine.

use tracing::instrument;

/// Display category of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MessageCategory {
    /// The game was won.
    Success,
    /// The game was drawn.
    Warning,
    /// A king is in check.
    Alert,
    /// Anything else.
    Neutral,
}

impl MessageCategory {
    /// Classifies a message. First match wins and matching is case-sensitive,
    /// so "Checkmate" is tested before "Check".
    #[instrument]
    pub fn classify(message: &str) -> Self {
        if message.contains("Checkmate") {
            Self::Success
        } else if message.contains("Stalemate") {
            Self::Warning
        } else if message.contains("Check") {
            Self::Alert
        } else {
            Self::Neutral
        }
    }
}
