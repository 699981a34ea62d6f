//! Summary commands: classify the request, run the orchestrator, reply to the conversation,
//! and move the requester's read cursor when a summary went out.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, instrument};

use crate::core::{Handler, HandlerResponse, InboundEvent, MessageSender, Result};
use crate::history::ReadCursorTracker;
use crate::mention::{route, Route};
use crate::summary::{classify_intent, Intent, IntentClassifier, SummaryOrchestrator};
use crate::transport::ReplyRouter;

/// Example commands listed when a command is not understood.
pub const MSG_NOT_UNDERSTOOD_EXAMPLES: &str = "I didn't understand that. Try:
• 'summarize today's chat'
• 'summarize from last read'
• 'catch me up on last 2 hours'";

/// Handles [`Route::Summarize`] events.
///
/// **External interactions:** IntentClassifier (LLM), SummaryOrchestrator (store + summarizer),
/// MessageSender (reply), ReadCursorTracker (write after a delivered summary).
#[derive(Clone)]
pub struct CommandHandler {
    classifier: Arc<dyn IntentClassifier>,
    orchestrator: SummaryOrchestrator,
    cursors: Arc<ReadCursorTracker>,
    sender: Arc<dyn MessageSender>,
    replies: ReplyRouter,
}

impl CommandHandler {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        orchestrator: SummaryOrchestrator,
        cursors: Arc<ReadCursorTracker>,
        sender: Arc<dyn MessageSender>,
        replies: ReplyRouter,
    ) -> Self {
        Self {
            classifier,
            orchestrator,
            cursors,
            sender,
            replies,
        }
    }

    /// Sends `text` to `to`. Returns whether it was handed off.
    async fn reply(&self, to: &str, text: &str) -> bool {
        match self.sender.send(to, text).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, to = %to, "Failed to send message");
                false
            }
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &InboundEvent) -> Result<HandlerResponse> {
        let command = match route(event, self.replies.mode()) {
            Route::Summarize { command } => command,
            _ => return Ok(HandlerResponse::Continue),
        };
        let Some(conversation_id) = event.conversation_id.as_deref() else {
            return Ok(HandlerResponse::Continue);
        };

        let to = self.replies.destination(conversation_id, &event.reply_to);
        info!(command = %command, to = %to, "step: CommandHandler parsing command");

        let intent = classify_intent(self.classifier.as_ref(), &command).await;
        let (reply, summarized) = match intent {
            Intent::Summarize {
                time_filter,
                from_last_read,
            } => {
                let outcome = self
                    .orchestrator
                    .produce_summary(
                        conversation_id,
                        &event.sender_id,
                        &time_filter,
                        from_last_read,
                    )
                    .await;
                (
                    format!("@{}\n\n{}", event.sender_name, outcome.render()),
                    outcome.is_success(),
                )
            }
            Intent::Help | Intent::Unknown => (
                format!("@{} {}", event.sender_name, MSG_NOT_UNDERSTOOD_EXAMPLES),
                false,
            ),
        };

        let delivered = self.reply(&to, &reply).await;
        if summarized && delivered {
            self.cursors
                .mark_read(&event.sender_id, conversation_id, Utc::now())
                .await;
        }

        info!(
            conversation_id = %conversation_id,
            summarized,
            delivered,
            "step: CommandHandler done"
        );
        if delivered {
            Ok(HandlerResponse::Reply(reply))
        } else {
            Ok(HandlerResponse::Stop)
        }
    }
}
