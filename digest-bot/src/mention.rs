//! Trigger detection and routing of inbound events.
//!
//! Decides, before any language model is involved, whether an event is a help request, a
//! summary command, or an ordinary chat message to store. Pure functions; the handlers in
//! [`crate::handlers`] each act on one [`Route`].

use std::sync::OnceLock;

use regex::Regex;

use crate::core::InboundEvent;
use crate::transport::RelayMode;

/// Case-insensitive substrings that address the bot.
pub const BOT_TRIGGERS: [&str; 5] = [
    "@bot",
    "@summarizer",
    "hey bot",
    "bot summarize",
    "summarize",
];

/// Bare commands that request a summary in sandbox mode.
const SANDBOX_SUMMARY_COMMANDS: [&str; 3] = ["summary", "/summary", "/sum"];

const HELP_COMMANDS: [&str; 2] = ["help", "/help"];

/// Returns true if `text` addresses the bot.
pub fn is_bot_mentioned(text: &str) -> bool {
    let lower = text.to_lowercase();
    BOT_TRIGGERS.iter().any(|t| lower.contains(t))
}

fn mention_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)@\w+\s*").expect("static mention regex"))
}

fn bot_word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bbot\b\s*").expect("static bot-word regex"))
}

/// Strips `@handle` tokens and the word "bot" and returns the trimmed command.
pub fn remove_bot_mention(text: &str) -> String {
    let without_handles = mention_pattern().replace_all(text, "");
    bot_word_pattern()
        .replace_all(&without_handles, "")
        .trim()
        .to_string()
}

/// What to do with an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Reply with help (or a greeting) directly to the sender.
    Help,
    /// Run `command` through the intent classifier for the event's conversation.
    Summarize { command: String },
    /// Ordinary group message: store it.
    Store,
}

/// Routes `event` according to `mode`.
///
/// - **Sandbox**: `help` / `/help` → help; a mention or `summary` / `/summary` / `/sum` →
///   summary command; anything else is stored.
/// - **Production**: a mention inside a group → summary command; other group messages are
///   stored; direct messages get help.
pub fn route(event: &InboundEvent, mode: RelayMode) -> Route {
    let mentioned = is_bot_mentioned(&event.text);
    match mode {
        RelayMode::Sandbox => {
            let lower = event.text.to_lowercase();
            if HELP_COMMANDS.contains(&lower.as_str()) {
                Route::Help
            } else if mentioned {
                Route::Summarize {
                    command: remove_bot_mention(&event.text),
                }
            } else if SANDBOX_SUMMARY_COMMANDS.contains(&lower.as_str()) {
                Route::Summarize {
                    command: event.text.clone(),
                }
            } else {
                Route::Store
            }
        }
        RelayMode::Production => match (mentioned, event.is_group()) {
            (true, true) => Route::Summarize {
                command: remove_bot_mention(&event.text),
            },
            (false, true) => Route::Store,
            (_, false) => Route::Help,
        },
    }
}
