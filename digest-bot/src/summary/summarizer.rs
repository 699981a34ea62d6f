//! External summarizer.

use std::sync::Arc;

use async_trait::async_trait;
use llm_client::{CompletionOptions, LlmClient};
use tracing::instrument;

/// Summarizes a formatted chat transcript (`sender: text` lines, oldest first).
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript: &str) -> anyhow::Result<String>;
}

/// [`Summarizer`] backed by an [`LlmClient`] with the group-chat summary instructions.
#[derive(Clone)]
pub struct LlmSummarizer {
    llm_client: Arc<dyn LlmClient>,
}

impl LlmSummarizer {
    pub const MAX_TOKENS: u32 = 600;
    pub const TEMPERATURE: f32 = 0.7;

    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    #[instrument(skip(self, transcript), fields(transcript_len = transcript.len()))]
    async fn summarize(&self, transcript: &str) -> anyhow::Result<String> {
        let options = CompletionOptions {
            max_tokens: Some(Self::MAX_TOKENS),
            temperature: Some(Self::TEMPERATURE),
        };
        let summary = self
            .llm_client
            .get_llm_response_with_messages(prompt::summary_messages(transcript), options)
            .await?;
        Ok(summary.trim().to_string())
    }
}
