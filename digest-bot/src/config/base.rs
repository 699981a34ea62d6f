//! Base config: bind address, logging, Twilio credentials, relay mode. Loaded from env.

use anyhow::{Context, Result};
use std::env;

use crate::transport::{RelayMode, TwilioConfig, DEFAULT_TWILIO_API_URL};

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// HOST
    pub host: String,
    /// PORT
    pub port: u16,
    /// Log file path
    pub log_file: String,
    /// SANDBOX_MODE: Twilio sandbox routing (single virtual group, replies to requester).
    pub sandbox_mode: bool,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    /// TWILIO_WHATSAPP_NUMBER, e.g. `whatsapp:+14155238886`
    pub twilio_whatsapp_number: String,
    /// TWILIO_API_URL; points at a mock server in tests.
    pub twilio_api_url: String,
}

impl BaseConfig {
    /// Load from environment variables. `port` overrides PORT if provided.
    pub fn load(port: Option<u16>) -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match port {
            Some(p) => p,
            None => match env::var("PORT") {
                Ok(s) => s
                    .parse()
                    .with_context(|| format!("PORT is not a valid port: {}", s))?,
                Err(_) => 8000,
            },
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/digest-bot.log".to_string());
        let sandbox_mode = env::var("SANDBOX_MODE")
            .map(|s| parse_flag(&s))
            .unwrap_or(true);
        let twilio_account_sid =
            env::var("TWILIO_ACCOUNT_SID").context("TWILIO_ACCOUNT_SID not set")?;
        let twilio_auth_token = env::var("TWILIO_AUTH_TOKEN").context("TWILIO_AUTH_TOKEN not set")?;
        let twilio_whatsapp_number =
            env::var("TWILIO_WHATSAPP_NUMBER").context("TWILIO_WHATSAPP_NUMBER not set")?;
        let twilio_api_url =
            env::var("TWILIO_API_URL").unwrap_or_else(|_| DEFAULT_TWILIO_API_URL.to_string());

        Ok(Self {
            host,
            port,
            log_file,
            sandbox_mode,
            twilio_account_sid,
            twilio_auth_token,
            twilio_whatsapp_number,
            twilio_api_url,
        })
    }

    /// Validate config (TWILIO_API_URL must be a valid URL, credentials non-empty).
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.twilio_api_url).is_err() {
            anyhow::bail!("TWILIO_API_URL is not a valid URL: {}", self.twilio_api_url);
        }
        if self.twilio_account_sid.trim().is_empty() || self.twilio_auth_token.trim().is_empty() {
            anyhow::bail!("TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN must not be empty");
        }
        if self.twilio_whatsapp_number.trim().is_empty() {
            anyhow::bail!("TWILIO_WHATSAPP_NUMBER must not be empty");
        }
        Ok(())
    }

    pub fn mode(&self) -> RelayMode {
        RelayMode::from_sandbox_flag(self.sandbox_mode)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn twilio(&self) -> TwilioConfig {
        TwilioConfig {
            account_sid: self.twilio_account_sid.clone(),
            auth_token: self.twilio_auth_token.clone(),
            from_number: self.twilio_whatsapp_number.clone(),
            api_url: self.twilio_api_url.clone(),
        }
    }
}

/// `true`/`1`/`yes`/`on` (any case) enable; anything else disables.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
