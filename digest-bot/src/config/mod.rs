//! Relay configuration: BaseConfig (server + logging + Twilio + mode) + HistoryConfig (limits).
//! LLM settings live in the llm-client crate (`EnvLlmConfig`).

mod base;
mod history_config;
mod relay_config;


pub use base::BaseConfig;
pub use history_config::HistoryConfig;
pub use relay_config::RelayConfig;
