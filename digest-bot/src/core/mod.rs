//! Core types and traits: Handler, MessageSender, InboundEvent, HandlerResponse, error, logger.
//! Transport-agnostic; the webhook layer converts Twilio fields into [`InboundEvent`].

pub mod error;
pub mod logger;
pub mod sender;
pub mod types;

pub use error::{DigestError, Result};
pub use logger::init_tracing;
pub use sender::MessageSender;
pub use types::{Handler, HandlerResponse, InboundEvent};
