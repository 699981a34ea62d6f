//! Where replies for a conversation go.
//!
//! Production replies go to the group itself. The sandbox has no real groups, so replies go
//! back to whoever asked.

use super::RelayMode;

#[derive(Debug, Clone, Copy)]
pub struct ReplyRouter {
    mode: RelayMode,
}

impl ReplyRouter {
    pub fn new(mode: RelayMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RelayMode {
        self.mode
    }

    /// Destination for a reply to `requester` in `conversation_id`.
    pub fn destination(&self, conversation_id: &str, requester: &str) -> String {
        match self.mode {
            RelayMode::Production => conversation_id.to_string(),
            RelayMode::Sandbox => requester.to_string(),
        }
    }
}
