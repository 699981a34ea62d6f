//! Error types for the relay core.
//!
//! None of these ever reach the chat: the webhook logs them and still acknowledges the event.

use thiserror::Error;

/// Top-level error. Outbound delivery is the only fallible step a handler propagates.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Sender error: {0}")]
    Sender(String),
}

/// Result type for core operations; uses [`DigestError`].
pub type Result<T> = std::result::Result<T, DigestError>;
