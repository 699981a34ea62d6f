//! # Summaries
//!
//! [`SummaryOrchestrator`] turns "summarize conversation X for user U under policy P" into
//! user-facing text: store snapshot → filter → token budget → [`Summarizer`]. Free-text
//! commands are mapped to an [`Intent`] by an [`IntentClassifier`] first.

pub mod intent;
pub mod orchestrator;
pub mod outcome;
pub mod summarizer;

pub use intent::{classify_intent, Intent, IntentClassifier, LlmIntentClassifier};
pub use orchestrator::{SummaryOrchestrator, DEFAULT_MAX_TOKENS_PER_SUMMARY};
pub use outcome::{range_text, SummaryOutcome, MSG_NO_MESSAGES, MSG_SUMMARY_FAILED};
pub use summarizer::{LlmSummarizer, Summarizer};
