//! Hand-written collaborators for integration tests.
//!
//! [`RecordingSender`] keeps every outbound message instead of calling Twilio; the scripted
//! summarizer and classifier return fixed answers and remember what they were asked.
//! [`Gate`] holds a summarizer or classifier call open so a test can act while it is in flight.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use digest_bot::{
    DigestError, HistoryConfig, InboundEvent, IntentClassifier, MessageSender, RelayComponents,
    RelayMode, Result, Summarizer,
};
use tokio::sync::Notify;

/// One recorded call to `send(to, text)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub text: String,
}

/// Records sends; optionally fails every send after recording it.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SentMessage>>,
    fail: bool,
}

impl RecordingSender {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, to: &str, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            to: to.to_string(),
            text: text.to_string(),
        });
        if self.fail {
            return Err(DigestError::Sender("twilio unavailable".to_string()));
        }
        Ok(())
    }
}

/// Returns a fixed summary and keeps each transcript it was given.
pub struct ScriptedSummarizer {
    reply: String,
    transcripts: Mutex<Vec<String>>,
}

impl ScriptedSummarizer {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            transcripts: Mutex::new(Vec::new()),
        })
    }

    pub fn transcripts(&self) -> Vec<String> {
        self.transcripts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for ScriptedSummarizer {
    async fn summarize(&self, transcript: &str) -> anyhow::Result<String> {
        self.transcripts.lock().unwrap().push(transcript.to_string());
        Ok(self.reply.clone())
    }
}

/// Always fails, like an unreachable LLM endpoint.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _transcript: &str) -> anyhow::Result<String> {
        anyhow::bail!("connection refused")
    }
}

/// Returns a fixed classifier answer (raw JSON text), or an error when built with `failing`.
pub struct ScriptedClassifier {
    answer: Option<String>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(answer.to_string()),
            commands: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            commands: Mutex::new(Vec::new()),
        })
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(&self, command: &str) -> anyhow::Result<String> {
        self.commands.lock().unwrap().push(command.to_string());
        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => anyhow::bail!("classifier timed out"),
        }
    }
}

/// Holds a collaborator call open until the test releases it.
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    /// Called by the collaborator: announces the call, then waits for [`Gate::open`].
    pub async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }

    /// Resolves once a collaborator call is in flight.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn open(&self) {
        self.release.notify_one();
    }
}

/// Summarizer that blocks inside `summarize` until its gate opens.
pub struct GatedSummarizer {
    gate: Arc<Gate>,
}

impl GatedSummarizer {
    pub fn new(gate: Arc<Gate>) -> Arc<Self> {
        Arc::new(Self { gate })
    }
}

#[async_trait]
impl Summarizer for GatedSummarizer {
    async fn summarize(&self, _transcript: &str) -> anyhow::Result<String> {
        self.gate.pass().await;
        Ok("• released".to_string())
    }
}

/// Classifier that blocks inside `classify` until its gate opens, then answers `answer`.
pub struct GatedClassifier {
    gate: Arc<Gate>,
    answer: String,
}

impl GatedClassifier {
    pub fn new(gate: Arc<Gate>, answer: &str) -> Arc<Self> {
        Arc::new(Self {
            gate,
            answer: answer.to_string(),
        })
    }
}

#[async_trait]
impl IntentClassifier for GatedClassifier {
    async fn classify(&self, _command: &str) -> anyhow::Result<String> {
        self.gate.pass().await;
        Ok(self.answer.clone())
    }
}

/// Classifier answer for "summarize everything".
pub const SUMMARIZE_ALL: &str =
    r#"{"action": "summarize", "time_filter": "all", "from_last_read": false}"#;

/// Classifier answer for "summarize since my last read".
pub const SUMMARIZE_LAST_READ: &str =
    r#"{"action": "summarize", "time_filter": "all", "from_last_read": true}"#;

pub fn components(
    mode: RelayMode,
    sender: Arc<RecordingSender>,
    classifier: Arc<dyn IntentClassifier>,
    summarizer: Arc<dyn Summarizer>,
) -> RelayComponents {
    RelayComponents::with_collaborators(
        mode,
        HistoryConfig::default(),
        sender,
        classifier,
        summarizer,
    )
}

/// Event as the production transport would produce it.
pub fn group_event(
    sender_id: &str,
    sender_name: &str,
    conversation_id: Option<&str>,
    text: &str,
    received_at: DateTime<Utc>,
) -> InboundEvent {
    InboundEvent {
        sender_id: sender_id.to_string(),
        sender_name: sender_name.to_string(),
        text: text.to_string(),
        conversation_id: conversation_id.map(str::to_string),
        reply_to: sender_id.to_string(),
        received_at,
    }
}
