//! Outbound message abstraction.
//!
//! [`MessageSender`] is transport-agnostic; `transport::TwilioSender` implements it via the
//! Twilio Messages API. Delivery is fire-and-forget from the relay's point of view: callers
//! log failures and never retry.

use async_trait::async_trait;

use super::error::Result;

/// Sends a text message to a destination identity (phone number, `whatsapp:` address or group id).
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, to: &str, text: &str) -> Result<()>;
}
