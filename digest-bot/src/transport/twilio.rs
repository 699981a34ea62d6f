//! Twilio Messages API implementation of [`MessageSender`].

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::core::{DigestError, MessageSender, Result};

pub const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com";

/// Credentials and addresses for the Twilio REST API.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Our WhatsApp sender address, e.g. `whatsapp:+14155238886`.
    pub from_number: String,
    /// API base URL; overridden in tests to point at a mock server.
    pub api_url: String,
}

/// Sends WhatsApp messages through `POST /2010-04-01/Accounts/{sid}/Messages.json`.
#[derive(Clone)]
pub struct TwilioSender {
    http: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSender {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl MessageSender for TwilioSender {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn send(&self, to: &str, text: &str) -> Result<()> {
        let params = [
            ("From", self.config.from_number.as_str()),
            ("To", to),
            ("Body", text),
        ];
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, to = %to, "Failed to send message");
                DigestError::Sender(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, to = %to, "Twilio rejected message");
            let message = format!("Twilio returned {}: {}", status, body);
            return Err(DigestError::Sender(message));
        }

        info!(to = %to, "Sent message");
        Ok(())
    }
}
