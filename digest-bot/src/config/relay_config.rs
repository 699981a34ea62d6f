//! RelayConfig: BaseConfig + HistoryConfig + LLM config. Use load() for env-based loading.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::{BaseConfig, HistoryConfig};
use crate::transport::RelayMode;

pub struct RelayConfig {
    pub base: BaseConfig,
    pub history: HistoryConfig,
    pub llm: EnvLlmConfig,
}

impl RelayConfig {
    /// Load full config from environment variables. If `port` is provided it overrides PORT.
    /// Call validate() after load to check config before serving.
    pub fn load(port: Option<u16>) -> Result<Self> {
        let base = BaseConfig::load(port)?;
        let history = HistoryConfig::from_env()?;
        let llm = EnvLlmConfig::from_env()?;
        Ok(Self { base, history, llm })
    }

    /// Validate config. Call after load() to fail fast before binding.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.history.validate()?;
        if reqwest::Url::parse(self.llm.base_url()).is_err() {
            anyhow::bail!(
                "OPENAI_BASE_URL is not a valid URL: {}",
                self.llm.base_url()
            );
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn history(&self) -> &HistoryConfig {
        &self.history
    }
    pub fn llm(&self) -> &EnvLlmConfig {
        &self.llm
    }

    pub fn mode(&self) -> RelayMode {
        self.base.mode()
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn bind_addr(&self) -> String {
        self.base.bind_addr()
    }
}
