//! SMTP configuration parsing from environment variables.
//!
//! Mail is optional: without `SMTP_HOST` the briefing only archives reports.

use crate::domain::errors::ConfigurationError;
use anyhow::{Context, Result};
use std::env;
use tracing::warn;

/// SMTP relay settings
#[derive(Debug, Clone, Default)]
pub struct MailEnvConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

impl MailEnvConfig {
    /// `None` when `SMTP_HOST` is unset or blank.
    pub fn from_env() -> Result<Option<Self>> {
        let host = env::var("SMTP_HOST").unwrap_or_default();
        if host.trim().is_empty() {
            return Ok(None);
        }

        let username = env::var("SMTP_USERNAME").unwrap_or_default();
        let config = Self {
            host,
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse::<u16>()
                .context("Failed to parse SMTP_PORT")?,
            password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            // sender defaults to the login account
            from: env::var("MAIL_FROM").unwrap_or_else(|_| username.clone()),
            to: env::var("MAIL_TO").unwrap_or_default(),
            username,
        };
        config.validate()?;
        Ok(Some(config))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let missing: Vec<&str> = [
            ("SMTP_HOST", &self.host),
            ("SMTP_USERNAME", &self.username),
            ("SMTP_PASSWORD", &self.password),
            ("MAIL_FROM", &self.from),
            ("MAIL_TO", &self.to),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect();

        if !missing.is_empty() {
            return Err(ConfigurationError::IncompleteMail {
                missing: missing.join(", "),
            });
        }
        if self.port == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "SMTP_PORT".to_string(),
                value: "0".to_string(),
            });
        }

        // QQ mail requires a 16-character authorization code, not the account password
        if self.from.ends_with("@qq.com") && self.password.chars().count() != 16 {
            warn!(
                "SMTP_PASSWORD for {} is {} characters; QQ mail expects a 16-character authorization code",
                self.from,
                self.password.chars().count()
            );
        }
        Ok(())
    }
}
