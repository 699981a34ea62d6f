//! History limits: retained messages per conversation and the summary token budget.

use anyhow::{Context, Result};
use std::env;

use crate::history::DEFAULT_MAX_RETAINED;
use crate::summary::DEFAULT_MAX_TOKENS_PER_SUMMARY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// MAX_RETAINED_MESSAGES
    pub max_retained_messages: usize,
    /// MAX_TOKENS_PER_SUMMARY
    pub max_tokens_per_summary: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_retained_messages: DEFAULT_MAX_RETAINED,
            max_tokens_per_summary: DEFAULT_MAX_TOKENS_PER_SUMMARY,
        }
    }
}

impl HistoryConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            max_retained_messages: usize_var("MAX_RETAINED_MESSAGES")?
                .unwrap_or(defaults.max_retained_messages),
            max_tokens_per_summary: usize_var("MAX_TOKENS_PER_SUMMARY")?
                .unwrap_or(defaults.max_tokens_per_summary),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_retained_messages == 0 {
            anyhow::bail!("MAX_RETAINED_MESSAGES must be at least 1");
        }
        Ok(())
    }
}

fn usize_var(name: &str) -> Result<Option<usize>> {
    match env::var(name) {
        Ok(s) if !s.trim().is_empty() => s
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} is not a non-negative integer: {}", name, s)),
        _ => Ok(None),
    }
}
