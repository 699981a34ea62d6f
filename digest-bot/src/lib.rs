//! # WhatsApp group summarizer relay
//!
//! Receives Twilio webhooks, keeps a bounded in-memory history per group, and answers summary
//! commands with LLM-written digests. Core types, history, summary orchestration, handlers,
//! HTTP server, and Twilio sender live here; LLM access comes from the llm-client crate.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod history;
pub mod mention;
pub mod runner;
pub mod server;
pub mod summary;
pub mod transport;

pub use cli::{load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, DigestError, Handler, HandlerResponse, InboundEvent, MessageSender, Result,
};

pub use chain::HandlerChain;

pub use config::{BaseConfig, HistoryConfig, RelayConfig};
pub use runner::run_relay;

pub use components::{build_app_state, build_handler_chain, build_relay_components, RelayComponents};
pub use handlers::{CommandHandler, HelpHandler, StoreHandler};
pub use history::{ConversationStore, Message, ReadCursorTracker, TimeFilter};
pub use server::{router, AppState};
pub use summary::{Intent, IntentClassifier, Summarizer, SummaryOrchestrator, SummaryOutcome};
pub use transport::{RelayMode, ReplyRouter, TwilioConfig, TwilioSender, WebhookForm};
