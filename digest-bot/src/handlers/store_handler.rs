//! Stores ordinary group messages in the conversation history.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::{Handler, HandlerResponse, InboundEvent, Result};
use crate::history::{ConversationStore, Message};
use crate::mention::{route, Route};
use crate::transport::RelayMode;

/// Appends [`Route::Store`] events to their conversation's log and ends the chain.
#[derive(Clone)]
pub struct StoreHandler {
    store: Arc<ConversationStore>,
    mode: RelayMode,
}

impl StoreHandler {
    pub fn new(store: Arc<ConversationStore>, mode: RelayMode) -> Self {
        Self { store, mode }
    }
}

#[async_trait]
impl Handler for StoreHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &InboundEvent) -> Result<HandlerResponse> {
        let conversation_id = match (&event.conversation_id, route(event, self.mode)) {
            (Some(id), Route::Store) => id,
            _ => return Ok(HandlerResponse::Continue),
        };

        let message = Message::new(
            event.sender_id.clone(),
            event.sender_name.clone(),
            event.text.clone(),
            event.received_at,
        );
        let total = self.store.append(conversation_id, message).await;
        info!(
            conversation_id = %conversation_id,
            sender_id = %event.sender_id,
            total,
            "step: StoreHandler stored message"
        );
        Ok(HandlerResponse::Stop)
    }
}
