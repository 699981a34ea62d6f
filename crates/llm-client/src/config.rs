//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

use crate::openai_llm::DEFAULT_MODEL;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    /// Model for chat summaries.
    fn summary_model(&self) -> &str;
    /// Model for command parsing; usually a smaller, cheaper model.
    fn intent_model(&self) -> &str;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub summary_model: String,
    pub intent_model: String,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn summary_model(&self) -> &str {
        &self.summary_model
    }
    fn intent_model(&self) -> &str {
        &self.intent_model
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. `OPENAI_API_KEY` is required.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let summary_model =
            non_empty_var("SUMMARY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let intent_model =
            non_empty_var("INTENT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            summary_model,
            intent_model,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}
