//! Direct replies to help requests and direct messages.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::core::{Handler, HandlerResponse, InboundEvent, MessageSender, Result};
use crate::mention::{route, Route};
use crate::transport::RelayMode;

pub const HELP_TEXT: &str = "🤖 *WhatsApp Group Summarizer Bot*

*How to use:*
1. Add me to your WhatsApp group
2. In the group, mention me with a command:

*Examples:*
- @bot summarize today's chat
- @bot summarize from my last read
- @bot catch me up on last 2 hours
- @bot what happened?

I'll reply directly in the group!

*Features:*
✅ Smart summaries (key points, questions, action items)
✅ Time-based filtering (today, last hour, etc)
✅ Tracks your last read position
✅ Token-aware (handles large chats)

Just mention me anytime in the group!";

pub const GREETING_TEXT: &str = "👋 Hi! I'm a group summarizer bot.

Add me to your WhatsApp groups and mention me:
'@bot summarize today's chat'

Type 'help' for more info!";

/// Picks the help text for a direct message: full help when the text asks for it, else a greeting.
pub fn help_reply(text: &str) -> &'static str {
    if text.to_lowercase().contains("help") || text.trim() == "/help" {
        HELP_TEXT
    } else {
        GREETING_TEXT
    }
}

/// Answers [`Route::Help`] events with a direct message to the sender.
#[derive(Clone)]
pub struct HelpHandler {
    sender: Arc<dyn MessageSender>,
    mode: RelayMode,
}

impl HelpHandler {
    pub fn new(sender: Arc<dyn MessageSender>, mode: RelayMode) -> Self {
        Self { sender, mode }
    }
}

#[async_trait]
impl Handler for HelpHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &InboundEvent) -> Result<HandlerResponse> {
        if route(event, self.mode) != Route::Help {
            return Ok(HandlerResponse::Continue);
        }

        let reply = help_reply(&event.text);
        info!(to = %event.reply_to, full_help = reply == HELP_TEXT, "step: HelpHandler sending DM");
        if let Err(e) = self.sender.send(&event.reply_to, reply).await {
            error!(error = %e, to = %event.reply_to, "Failed to send DM");
            return Ok(HandlerResponse::Stop);
        }
        Ok(HandlerResponse::Reply(reply.to_string()))
    }
}
