//! Uniform inbound event handed to the handler chain, whatever the transport mode.

use chrono::{DateTime, Utc};

/// One inbound chat message after transport parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Stable sender identity (e.g. `whatsapp:+15551234567`); keys read cursors.
    pub sender_id: String,
    /// Profile name shown in summaries; `"Unknown"` when the platform sends none.
    pub sender_name: String,
    /// Message body, trimmed.
    pub text: String,
    /// Group id; `None` for a direct message to the bot.
    pub conversation_id: Option<String>,
    /// Address of the person who sent the event; replies to the requester go here.
    pub reply_to: String,
    pub received_at: DateTime<Utc>,
}

impl InboundEvent {
    pub fn is_group(&self) -> bool {
        self.conversation_id.is_some()
    }
}
