//! Token-budget truncation.
//!
//! Token counts are estimated as characters / [`CHARS_PER_TOKEN`] over the sender's display
//! name and the text. When a selection is over budget, the newest messages win: the result is
//! always a contiguous suffix of the input, and never empty for non-empty input: a newest
//! message that alone exceeds the budget is still kept.

use tracing::warn;

use super::message::Message;

/// Characters per token used by the estimate.
pub const CHARS_PER_TOKEN: f64 = 4.0;

/// Estimated tokens for one message (fractional; summed before comparing to the budget).
pub fn estimate_message_tokens(message: &Message) -> f64 {
    let chars = message.sender_display_name.chars().count() + message.text.chars().count();
    chars as f64 / CHARS_PER_TOKEN
}

/// Returns the longest suffix of `messages` whose estimated total fits in `max_tokens`.
///
/// Input under budget is returned unchanged. Otherwise messages are taken from the newest
/// backwards until the next one would exceed the budget. The newest message is always kept.
pub fn truncate_to_budget(mut messages: Vec<Message>, max_tokens: usize) -> Vec<Message> {
    let budget = max_tokens as f64;
    let total: f64 = messages.iter().map(estimate_message_tokens).sum();
    if total <= budget {
        return messages;
    }

    let mut used = 0.0;
    let mut kept = 0usize;
    for message in messages.iter().rev() {
        let cost = estimate_message_tokens(message);
        if used + cost > budget && kept > 0 {
            break;
        }
        used += cost;
        kept += 1;
    }

    let before = messages.len();
    let suffix = messages.split_off(before - kept);
    warn!(
        before,
        after = suffix.len(),
        estimated_tokens = total as u64,
        max_tokens,
        "Truncated messages to token budget"
    );
    suffix
}
