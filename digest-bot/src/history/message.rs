//! Stored chat message.

use chrono::{DateTime, Utc};

/// One message as retained in a conversation log. Never modified after it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender_display_name: String,
    /// Stable identity, distinct from the display name.
    pub sender_id: String,
    pub text: String,
    /// Ingestion time; non-decreasing within a conversation.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(
        sender_id: impl Into<String>,
        sender_display_name: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sender_display_name: sender_display_name.into(),
            sender_id: sender_id.into(),
            text: text.into(),
            timestamp,
        }
    }

    /// Stamps the message with the current time.
    pub fn now(
        sender_id: impl Into<String>,
        sender_display_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(sender_id, sender_display_name, text, Utc::now())
    }
}
