//! Command intent: what the user asked the bot to do.
//!
//! The classifier is an external language model returning loosely structured JSON; its output
//! is validated here into the closed [`Intent`] type. Anything that does not validate is
//! [`Intent::Unknown`], never an error.

use std::sync::Arc;

use async_trait::async_trait;
use llm_client::{CompletionOptions, LlmClient};
use serde_json::{Map, Value};
use tracing::{error, info, instrument, warn};

use crate::history::TimeFilter;

/// Parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Summarize {
        time_filter: TimeFilter,
        from_last_read: bool,
    },
    Help,
    Unknown,
}

impl Intent {
    /// Validates raw classifier output.
    ///
    /// Code fences are stripped, then the text must be a JSON object whose `action` is
    /// `summarize`, `help` or `unknown`. For `summarize`, a missing `time_filter` means `all`
    /// and a missing `from_last_read` means `false`; present fields of the wrong JSON type make
    /// the whole result `Unknown`. Unknown `time_filter` strings are kept as
    /// [`TimeFilter::Unrecognized`].
    pub fn from_classifier_output(raw: &str) -> Self {
        let cleaned = prompt::strip_code_fences(raw);
        let object = match serde_json::from_str::<Value>(&cleaned) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                warn!(raw = %raw, "Classifier output is not a JSON object");
                return Self::Unknown;
            }
            Err(e) => {
                warn!(error = %e, raw = %raw, "Classifier output is not valid JSON");
                return Self::Unknown;
            }
        };

        match object.get("action").and_then(Value::as_str) {
            Some("summarize") => Self::summarize_from(&object).unwrap_or(Self::Unknown),
            Some("help") => Self::Help,
            Some("unknown") => Self::Unknown,
            other => {
                warn!(action = ?other, "Classifier returned no usable action");
                Self::Unknown
            }
        }
    }

    fn summarize_from(object: &Map<String, Value>) -> Option<Self> {
        let time_filter = match object.get("time_filter") {
            None | Some(Value::Null) => TimeFilter::All,
            Some(Value::String(s)) => TimeFilter::parse(s),
            Some(_) => return None,
        };
        let from_last_read = match object.get("from_last_read") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => return None,
        };
        Some(Self::Summarize {
            time_filter,
            from_last_read,
        })
    }
}

/// External command classifier. Returns the model's raw answer; validation happens in
/// [`Intent::from_classifier_output`].
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, command: &str) -> anyhow::Result<String>;
}

/// Classifies `command` and validates the answer. Classifier failures are logged and
/// become [`Intent::Unknown`].
#[instrument(skip(classifier))]
pub async fn classify_intent(classifier: &dyn IntentClassifier, command: &str) -> Intent {
    match classifier.classify(command).await {
        Ok(raw) => {
            let intent = Intent::from_classifier_output(&raw);
            info!(intent = ?intent, "step: intent parsed");
            intent
        }
        Err(e) => {
            error!(error = %e, "Error parsing intent");
            Intent::Unknown
        }
    }
}

/// [`IntentClassifier`] backed by an [`LlmClient`]: deterministic, short answers.
#[derive(Clone)]
pub struct LlmIntentClassifier {
    llm_client: Arc<dyn LlmClient>,
}

impl LlmIntentClassifier {
    pub const MAX_TOKENS: u32 = 200;

    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, command: &str) -> anyhow::Result<String> {
        let options = CompletionOptions {
            max_tokens: Some(Self::MAX_TOKENS),
            temperature: Some(0.0),
        };
        let answer = self
            .llm_client
            .get_llm_response_with_messages(prompt::intent_messages(command), options)
            .await?;
        Ok(answer.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Intent {
        Intent::from_classifier_output(raw)
    }

    fn summarize(time_filter: TimeFilter, from_last_read: bool) -> Intent {
        Intent::Summarize {
            time_filter,
            from_last_read,
        }
    }

    #[test]
    fn test_full_summarize_object() {
        let raw =
            r#"{"action": "summarize", "time_filter": "last_2_hours", "from_last_read": false}"#;
        assert_eq!(parse(raw), summarize(TimeFilter::LastTwoHours, false));
    }

    #[test]
    fn test_fenced_json() {
        let raw = "```json\n{\"action\": \"summarize\", \"from_last_read\": true}\n```";
        assert_eq!(parse(raw), summarize(TimeFilter::All, true));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        assert_eq!(
            parse(r#"{"action": "summarize"}"#),
            summarize(TimeFilter::All, false)
        );
    }

    #[test]
    fn test_unrecognized_time_filter_is_kept() {
        let raw = r#"{"action": "summarize", "time_filter": "last_week"}"#;
        assert_eq!(
            parse(raw),
            summarize(TimeFilter::Unrecognized("last_week".to_string()), false)
        );
    }

    #[test]
    fn test_wrong_field_types_are_unknown() {
        assert_eq!(
            parse(r#"{"action": "summarize", "time_filter": 3}"#),
            Intent::Unknown
        );
        assert_eq!(
            parse(r#"{"action": "summarize", "from_last_read": "yes"}"#),
            Intent::Unknown
        );
    }

    #[test]
    fn test_help_and_unknown_actions() {
        assert_eq!(parse(r#"{"action": "help"}"#), Intent::Help);
        assert_eq!(parse(r#"{"action": "unknown"}"#), Intent::Unknown);
        assert_eq!(parse(r#"{"action": "dance"}"#), Intent::Unknown);
        assert_eq!(parse(r#"{"time_filter": "all"}"#), Intent::Unknown);
    }

    #[test]
    fn test_malformed_output_is_unknown() {
        assert_eq!(parse(""), Intent::Unknown);
        assert_eq!(parse("Sure! Here you go"), Intent::Unknown);
        assert_eq!(parse("[1, 2]"), Intent::Unknown);
    }
}
