//! Transport plumbing: Twilio webhook fields → [`InboundEvent`], reply destinations, and the
//! Twilio sender. Sandbox mode is handled entirely here and in routing; the history engine
//! always sees plain (conversation id, sender) pairs.

mod replies;
mod twilio;

use chrono::Utc;
use serde::Deserialize;

use crate::core::InboundEvent;

pub use replies::ReplyRouter;
pub use twilio::{TwilioConfig, TwilioSender, DEFAULT_TWILIO_API_URL};

/// Conversation id every message is filed under in sandbox mode.
pub const SANDBOX_GROUP_ID: &str = "group_test";

/// Display name used when the platform sends no profile name.
pub const UNKNOWN_SENDER_NAME: &str = "Unknown";

/// How inbound traffic is mapped onto conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMode {
    /// Twilio sandbox: no real groups. Every message belongs to [`SANDBOX_GROUP_ID`] and
    /// replies go to whoever asked.
    Sandbox,
    /// WhatsApp Business API: `GroupId` / `Author` identify groups and members.
    Production,
}

impl RelayMode {
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

/// Form fields of a Twilio WhatsApp webhook the relay reads. Only `From` and `Body` are
/// required; other Twilio fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookForm {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "ProfileName", default)]
    pub profile_name: Option<String>,
    #[serde(rename = "Author", default)]
    pub author: Option<String>,
    #[serde(rename = "GroupId", default)]
    pub group_id: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl InboundEvent {
    /// Maps webhook fields onto the uniform event model for the given mode.
    pub fn from_webhook(form: &WebhookForm, mode: RelayMode) -> Self {
        let sender_name = non_empty(&form.profile_name)
            .unwrap_or(UNKNOWN_SENDER_NAME)
            .to_string();
        let (sender_id, conversation_id) = match mode {
            RelayMode::Sandbox => (form.from.clone(), Some(SANDBOX_GROUP_ID.to_string())),
            RelayMode::Production => (
                non_empty(&form.author).unwrap_or(&form.from).to_string(),
                non_empty(&form.group_id).map(str::to_string),
            ),
        };
        Self {
            sender_id,
            sender_name,
            text: form.body.trim().to_string(),
            conversation_id,
            reply_to: form.from.clone(),
            received_at: Utc::now(),
        }
    }
}
