//! # Conversation history
//!
//! In-memory retention and selection of chat messages:
//!
//! - [`ConversationStore`]: per-conversation append-only log with a retention cap.
//! - [`ReadCursorTracker`]: per-(user, conversation) "summarized through here" timestamp.
//! - [`filter`]: last-read and time-window selection over a log.
//! - [`budget`]: token-budget truncation keeping the newest messages.
//! - [`stats`]: read-only projections for the operational endpoints.
//!
//! Everything here lives for the process lifetime; nothing is persisted.

pub mod budget;
pub mod cursor;
pub mod filter;
mod message;
pub mod stats;
pub mod store;

pub use budget::{estimate_message_tokens, truncate_to_budget, CHARS_PER_TOKEN};
pub use cursor::ReadCursorTracker;
pub use filter::{
    filter_for_user, filter_messages, TimeFilter, ALL_MESSAGES_CAP, FIRST_READ_FALLBACK,
};
pub use message::Message;
pub use stats::ConversationStats;
pub use store::{ConversationStore, DEFAULT_MAX_RETAINED};
