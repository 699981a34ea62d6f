//! Summary orchestration: store snapshot → filter → token budget → summarizer.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use tracing::{error, info, instrument};

use crate::history::{
    filter_for_user, truncate_to_budget, ConversationStore, ReadCursorTracker, TimeFilter,
    CHARS_PER_TOKEN,
};

use super::outcome::SummaryOutcome;
use super::summarizer::Summarizer;

/// Estimated tokens handed to the summarizer when no budget is configured.
pub const DEFAULT_MAX_TOKENS_PER_SUMMARY: usize = 8000;

/// Produces summaries for a conversation. Reads the store and cursors, never writes them.
#[derive(Clone)]
pub struct SummaryOrchestrator {
    store: Arc<ConversationStore>,
    cursors: Arc<ReadCursorTracker>,
    summarizer: Arc<dyn Summarizer>,
    max_tokens: usize,
}

impl SummaryOrchestrator {
    pub fn new(
        store: Arc<ConversationStore>,
        cursors: Arc<ReadCursorTracker>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            store,
            cursors,
            summarizer,
            max_tokens: DEFAULT_MAX_TOKENS_PER_SUMMARY,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Summarizes `conversation_id` for `user_id` using the local clock.
    ///
    /// The caller moves the read cursor when the outcome
    /// [is a success](SummaryOutcome::is_success).
    pub async fn produce_summary(
        &self,
        conversation_id: &str,
        user_id: &str,
        time_filter: &TimeFilter,
        from_last_read: bool,
    ) -> SummaryOutcome {
        self.produce_summary_at(
            conversation_id,
            user_id,
            time_filter,
            from_last_read,
            &Local::now(),
        )
        .await
    }

    /// [`produce_summary`](Self::produce_summary) with an explicit clock.
    #[instrument(skip(self, time_filter, now), fields(time_filter = %time_filter))]
    pub async fn produce_summary_at<Tz: TimeZone>(
        &self,
        conversation_id: &str,
        user_id: &str,
        time_filter: &TimeFilter,
        from_last_read: bool,
        now: &DateTime<Tz>,
    ) -> SummaryOutcome {
        // Snapshot; no store lock is held past this point.
        let log = self.store.get(conversation_id).await;
        if log.is_empty() {
            info!(conversation_id = %conversation_id, "step: no messages stored");
            return SummaryOutcome::NoMessages;
        }

        let selected = filter_for_user(
            &self.cursors,
            &log,
            user_id,
            conversation_id,
            time_filter,
            from_last_read,
            now,
        )
        .await;
        if selected.is_empty() {
            info!(
                conversation_id = %conversation_id,
                stored = log.len(),
                "step: no messages matched filter"
            );
            return SummaryOutcome::NoMatches(time_filter.clone());
        }

        let selected = truncate_to_budget(selected, self.max_tokens);
        let message_count = selected.len();
        let transcript = prompt::format_transcript(
            selected
                .iter()
                .map(|m| (m.sender_display_name.as_str(), m.text.as_str())),
        );
        info!(
            conversation_id = %conversation_id,
            stored = log.len(),
            message_count,
            estimated_input_tokens = (transcript.chars().count() as f64 / CHARS_PER_TOKEN) as u64,
            "step: submitting transcript to summarizer"
        );

        match self.summarizer.summarize(&transcript).await {
            Ok(summary) => SummaryOutcome::Summarized {
                summary,
                message_count,
                time_filter: time_filter.clone(),
                from_last_read,
            },
            Err(e) => {
                for (i, cause) in e.chain().enumerate() {
                    if i == 0 {
                        error!(
                            cause = %cause,
                            conversation_id = %conversation_id,
                            "Summarizer failed"
                        );
                    } else {
                        error!(cause = %cause, "Caused by");
                    }
                }
                SummaryOutcome::Failed
            }
        }
    }
}
