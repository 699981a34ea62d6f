//! Result of a summary request and its user-facing rendering.

use crate::history::TimeFilter;

/// Conversation has no stored messages.
pub const MSG_NO_MESSAGES: &str = "📝 No messages to summarize yet!";

/// Summarizer call failed.
pub const MSG_SUMMARY_FAILED: &str = "❌ Failed to generate summary. Please try again.";

/// What [`SummaryOrchestrator::produce_summary`](super::SummaryOrchestrator::produce_summary)
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Nothing stored for the conversation.
    NoMessages,
    /// Messages are stored but none matched the request.
    NoMatches(TimeFilter),
    /// The summarizer failed; details are in the logs only.
    Failed,
    Summarized {
        summary: String,
        /// Messages handed to the summarizer, after truncation.
        message_count: usize,
        time_filter: TimeFilter,
        from_last_read: bool,
    },
}

impl SummaryOutcome {
    /// Only a produced summary moves the requester's read cursor.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Summarized { .. })
    }

    /// Text sent back to the chat.
    pub fn render(&self) -> String {
        match self {
            Self::NoMessages => MSG_NO_MESSAGES.to_string(),
            Self::NoMatches(time_filter) => format!("📝 No messages found for '{}'", time_filter),
            Self::Failed => MSG_SUMMARY_FAILED.to_string(),
            Self::Summarized {
                summary,
                message_count,
                time_filter,
                from_last_read,
            } => {
                let range = range_text(time_filter, *from_last_read);
                let range = if range.is_empty() {
                    String::new()
                } else {
                    format!(" {}", range)
                };
                format!(
                    "📝 *Summary* ({} messages{}):\n\n{}",
                    message_count, range, summary
                )
            }
        }
    }
}

/// Human-readable range for the summary header; empty for `all` and unrecognized filters.
pub fn range_text(time_filter: &TimeFilter, from_last_read: bool) -> &'static str {
    if from_last_read {
        return "since your last read";
    }
    match time_filter {
        TimeFilter::Today => "from today",
        TimeFilter::LastHour => "from last hour",
        TimeFilter::LastTwoHours => "from last 2 hours",
        TimeFilter::LastDay => "from last 24 hours",
        TimeFilter::All | TimeFilter::Unrecognized(_) => "",
    }
}
