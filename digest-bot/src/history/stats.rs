//! Per-conversation statistics for the operational endpoints. Pure projections over a log.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::message::Message;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationStats {
    pub total_messages: usize,
    /// Distinct display names.
    pub unique_senders: usize,
    /// Display name with the most messages; ties go to whoever spoke first.
    pub top_sender: Option<String>,
    pub oldest_message: Option<DateTime<Utc>>,
    pub newest_message: Option<DateTime<Utc>>,
}

impl ConversationStats {
    pub fn from_messages<'a, I>(messages: I) -> Self
    where
        I: IntoIterator<Item = &'a Message>,
    {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;
        let mut oldest = None;
        let mut newest = None;

        for message in messages {
            total += 1;
            if oldest.is_none() {
                oldest = Some(message.timestamp);
            }
            newest = Some(message.timestamp);

            let name = message.sender_display_name.as_str();
            let count = counts.entry(name).or_insert(0);
            if *count == 0 {
                order.push(name);
            }
            *count += 1;
        }

        let mut top: Option<(&str, usize)> = None;
        for name in &order {
            let count = counts[name];
            if top.map_or(true, |(_, best)| count > best) {
                top = Some((name, count));
            }
        }

        Self {
            total_messages: total,
            unique_senders: order.len(),
            top_sender: top.map(|(name, _)| name.to_string()),
            oldest_message: oldest,
            newest_message: newest,
        }
    }
}
