//! Read cursors: per user, per conversation, the time through which the user has been
//! summarized.
//!
//! Written only after a summary was produced and handed to the sender for that user and
//! conversation. A missing cursor means "never summarized", which the filter treats
//! differently from "read everything".

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

type CursorMap = HashMap<String, HashMap<String, DateTime<Utc>>>;

/// user id → conversation id → last read timestamp.
#[derive(Debug, Default)]
pub struct ReadCursorTracker {
    cursors: RwLock<CursorMap>,
}

impl ReadCursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: &str, conversation_id: &str) -> Option<DateTime<Utc>> {
        self.cursors
            .read()
            .await
            .get(user_id)
            .and_then(|per_conversation| per_conversation.get(conversation_id))
            .copied()
    }

    /// Overwrites the cursor for `(user_id, conversation_id)`.
    pub async fn mark_read(&self, user_id: &str, conversation_id: &str, at: DateTime<Utc>) {
        self.cursors
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .insert(conversation_id.to_string(), at);
        info!(
            user_id = %user_id,
            conversation_id = %conversation_id,
            last_read = %at,
            "Read cursor updated"
        );
    }

    /// Number of distinct users with at least one cursor.
    pub async fn tracked_users(&self) -> usize {
        self.cursors.read().await.len()
    }
}
