//! Conversation store: one bounded, append-only log per conversation id.
//!
//! The id → log map sits behind an `RwLock` whose write side is only taken to create a log;
//! each log has its own `Mutex`, so appends to different conversations never wait on each other
//! and appends to the same conversation are serialized.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::message::Message;
use super::stats::ConversationStats;

/// Messages kept per conversation when no limit is configured.
pub const DEFAULT_MAX_RETAINED: usize = 2000;

type Log = Arc<Mutex<VecDeque<Message>>>;

/// Shared in-memory message history. Clone the surrounding `Arc`, not the store.
#[derive(Debug)]
pub struct ConversationStore {
    logs: RwLock<HashMap<String, Log>>,
    max_retained: usize,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::with_max_retained(DEFAULT_MAX_RETAINED)
    }

    /// `max_retained` is clamped to at least 1.
    pub fn with_max_retained(max_retained: usize) -> Self {
        Self {
            logs: RwLock::new(HashMap::new()),
            max_retained: max_retained.max(1),
        }
    }

    pub fn max_retained(&self) -> usize {
        self.max_retained
    }

    async fn log_for(&self, conversation_id: &str) -> Option<Log> {
        self.logs.read().await.get(conversation_id).cloned()
    }

    async fn log_or_create(&self, conversation_id: &str) -> Log {
        if let Some(log) = self.log_for(conversation_id).await {
            return log;
        }
        let mut logs = self.logs.write().await;
        logs.entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(VecDeque::new())))
            .clone()
    }

    /// Appends `message` to the conversation's log, evicting the oldest entries beyond the cap.
    /// Returns the log length afterwards.
    ///
    /// A message stamped earlier than the current tail (clock skew between concurrent
    /// requests) is stored with the tail's timestamp so the log stays non-decreasing.
    pub async fn append(&self, conversation_id: &str, mut message: Message) -> usize {
        let log = self.log_or_create(conversation_id).await;
        let mut entries = log.lock().await;

        if let Some(last) = entries.back() {
            if message.timestamp < last.timestamp {
                debug!(
                    conversation_id = %conversation_id,
                    "Message timestamp older than log tail; clamping"
                );
                message.timestamp = last.timestamp;
            }
        }
        entries.push_back(message);

        let mut evicted = 0usize;
        while entries.len() > self.max_retained {
            entries.pop_front();
            evicted += 1;
        }
        let len = entries.len();
        drop(entries);

        info!(
            conversation_id = %conversation_id,
            total = len,
            evicted,
            "Stored message"
        );
        len
    }

    /// Full log, oldest first. Unknown conversations yield an empty vector.
    pub async fn get(&self, conversation_id: &str) -> Vec<Message> {
        match self.log_for(conversation_id).await {
            Some(log) => log.lock().await.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub async fn conversation_count(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn total_messages(&self) -> usize {
        let logs: Vec<Log> = self.logs.read().await.values().cloned().collect();
        let mut total = 0;
        for log in logs {
            total += log.lock().await.len();
        }
        total
    }

    /// Per-conversation statistics, keyed by conversation id.
    pub async fn conversation_stats(&self) -> BTreeMap<String, ConversationStats> {
        let logs: Vec<(String, Log)> = self
            .logs
            .read()
            .await
            .iter()
            .map(|(id, log)| (id.clone(), log.clone()))
            .collect();

        let mut stats = BTreeMap::new();
        for (id, log) in logs {
            let entries = log.lock().await;
            stats.insert(id, ConversationStats::from_messages(entries.iter()));
        }
        stats
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn msg_at(text: &str, secs: i64) -> Message {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::seconds(secs);
        Message::new("u1", "Alice", text, t)
    }

    /// **Test: A held conversation log does not block other conversations.**
    ///
    /// **Expected:** with conversation "a"'s log locked, an append to "b" finishes and
    /// "a" is untouched.
    #[tokio::test]
    async fn test_locked_log_does_not_block_other_conversation() {
        let store = ConversationStore::new();
        store.append("a", msg_at("held", 0)).await;
        let log_a = store.log_for("a").await.unwrap();
        let guard = log_a.lock().await;

        let appended = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            store.append("b", msg_at("free", 1)),
        )
        .await
        .expect("append to b waited on a's log");
        assert_eq!(appended, 1);
        assert_eq!(guard.len(), 1);
        drop(guard);
        assert_eq!(store.get("a").await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_is_empty() {
        let store = ConversationStore::new();
        assert!(store.get("nope").await.is_empty());
        assert_eq!(store.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn test_append_keeps_order() {
        let store = ConversationStore::new();
        store.append("g1", msg_at("a", 0)).await;
        store.append("g1", msg_at("b", 1)).await;
        let texts: Vec<String> = store.get("g1").await.into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_eviction_drops_oldest() {
        let store = ConversationStore::with_max_retained(3);
        for i in 0..5 {
            let len = store.append("g1", msg_at(&i.to_string(), i)).await;
            assert!(len <= 3);
        }
        let texts: Vec<String> = store.get("g1").await.into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_zero_cap_clamped_to_one() {
        let store = ConversationStore::with_max_retained(0);
        store.append("g1", msg_at("a", 0)).await;
        store.append("g1", msg_at("b", 1)).await;
        assert_eq!(store.max_retained(), 1);
        assert_eq!(store.get("g1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_older_timestamp_is_clamped_to_tail() {
        let store = ConversationStore::new();
        store.append("g1", msg_at("late", 10)).await;
        store.append("g1", msg_at("early", 5)).await;
        let log = store.get("g1").await;
        assert_eq!(log[1].text, "early");
        assert_eq!(log[1].timestamp, log[0].timestamp);
    }

    #[tokio::test]
    async fn test_counts_across_conversations() {
        let store = ConversationStore::new();
        store.append("g1", msg_at("a", 0)).await;
        store.append("g1", msg_at("b", 1)).await;
        store.append("g2", msg_at("c", 2)).await;
        assert_eq!(store.conversation_count().await, 2);
        assert_eq!(store.total_messages().await, 3);
        let stats = store.conversation_stats().await;
        assert_eq!(stats["g1"].total_messages, 2);
        assert_eq!(stats["g2"].total_messages, 1);
    }
}
