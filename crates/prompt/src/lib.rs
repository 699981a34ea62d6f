//! # Prompt
//!
//! Prompt texts and pure formatting helpers for the two language-model calls the relay makes:
//!
//! - **Summary**: a chat transcript (`sender: text` lines, oldest first) is summarized into
//!   3–7 bullet points. See [`SUMMARY_SYSTEM_PROMPT`], [`format_transcript`],
//!   [`summary_user_prompt`].
//! - **Command parsing**: free text such as "catch me up since last time" is turned into a JSON
//!   object with `action`, `time_filter` and `from_last_read`. See [`INTENT_SYSTEM_PROMPT`],
//!   [`intent_user_prompt`], [`strip_code_fences`].
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to OpenAI-compatible chat completion APIs.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// System instruction for the group-chat summarizer.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a WhatsApp group summarizer.
Create a concise, actionable summary focusing on:
- Key decisions or announcements
- Important questions (especially unanswered ones)
- Action items or tasks
- Notable discussions
- Urgent/time-sensitive info

Format:
- Use 3-7 bullet points
- Use WhatsApp formatting (*bold*, _italic_)
- Be conversational and highlight what matters
- If someone was asked a question, mention it clearly
- Keep it scannable and useful

Do NOT include greetings, small talk, or irrelevant chatter.";

/// System instruction for the command parser. The model must answer with a bare JSON object.
pub const INTENT_SYSTEM_PROMPT: &str = r#"You are a command parser for a WhatsApp summarizer bot.
Parse the user's command and return ONLY a JSON object:
{
    "action": "summarize|help|unknown",
    "time_filter": "today|last_hour|last_2_hours|last_day|all",
    "from_last_read": true|false
}

Examples:
"summarize today's chat" -> {"action": "summarize", "time_filter": "today", "from_last_read": false}
"catch me up from where I left" -> {"action": "summarize", "time_filter": "all", "from_last_read": true}
"what happened in last 2 hours" -> {"action": "summarize", "time_filter": "last_2_hours", "from_last_read": false}
"summarize from my last read" -> {"action": "summarize", "time_filter": "all", "from_last_read": true}
"summarize" -> {"action": "summarize", "time_filter": "all", "from_last_read": true}
"#;

/// Formats `(sender, text)` pairs as one `sender: text` line each, in the given order.
pub fn format_transcript<I, S, T>(lines: I) -> String
where
    I: IntoIterator<Item = (S, T)>,
    S: AsRef<str>,
    T: AsRef<str>,
{
    lines
        .into_iter()
        .map(|(sender, text)| format!("{}: {}", sender.as_ref(), text.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// User turn for the summarizer: fixed lead-in followed by the transcript.
pub fn summary_user_prompt(transcript: &str) -> String {
    format!("Summarize this WhatsApp group chat:\n\n{}", transcript)
}

/// Builds the full message list for a summary request.
pub fn summary_messages(transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(summary_user_prompt(transcript)),
    ]
}

/// User turn for the command parser.
pub fn intent_user_prompt(command: &str) -> String {
    format!("Parse this command: {}", command)
}

/// Builds the full message list for a command-parsing request.
pub fn intent_messages(command: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(INTENT_SYSTEM_PROMPT),
        ChatMessage::user(intent_user_prompt(command)),
    ]
}

/// Removes Markdown code fences (```` ``` ```` or ```` ```json ````) that models tend to wrap
/// JSON answers in, and trims the result.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = text.trim();
    if let Some(rest) = out.strip_prefix("```") {
        out = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = out.trim_end().strip_suffix("```") {
        out = rest;
    }
    out.trim().to_string()
}
