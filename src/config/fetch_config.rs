//! Transcript fetch configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_NEWS_BASE_URL: &str = "http://mrxwlb.com/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Transcript site and HTTP client settings
#[derive(Debug, Clone)]
pub struct FetchEnvConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_secs: u64,
    pub user_agent: String,
}

impl Default for FetchEnvConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            timeout_secs: 20,
            max_retries: 4,
            retry_backoff_secs: 2,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            base_url: env::var("NEWS_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: Self::parse_u64("FETCH_TIMEOUT_SECS", defaults.timeout_secs)?,
            max_retries: env::var("FETCH_MAX_RETRIES")
                .unwrap_or_else(|_| defaults.max_retries.to_string())
                .parse::<u32>()
                .context("Failed to parse FETCH_MAX_RETRIES")?,
            retry_backoff_secs: Self::parse_u64(
                "FETCH_RETRY_BACKOFF_SECS",
                defaults.retry_backoff_secs,
            )?,
            user_agent: env::var("FETCH_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    fn parse_u64(key: &str, default: u64) -> Result<u64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u64>()
            .context(format!("Failed to parse {}", key))
    }
}
