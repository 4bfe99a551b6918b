//! Configuration module for Sectorscope.
//!
//! Runtime settings come from environment variables (a `.env` file is loaded
//! first by the binary), organized by concern: Fetch, Mail and Report.
//! The keyword taxonomy is a separate TOML document, see [`keyword_config`].

mod fetch_config;
pub mod keyword_config;
mod mail_config;
mod report_config;

pub use fetch_config::{DEFAULT_NEWS_BASE_URL, DEFAULT_USER_AGENT, FetchEnvConfig};
pub use mail_config::MailEnvConfig;
pub use report_config::ReportEnvConfig;

use crate::domain::keywords::KeywordConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Main application configuration.
///
/// Aggregates all sub-configs loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub fetch: FetchEnvConfig,
    /// `None` disables mail delivery
    pub mail: Option<MailEnvConfig>,
    pub report_dir: PathBuf,
    pub keywords_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let fetch = FetchEnvConfig::from_env().context("Failed to load fetch config")?;
        let mail = MailEnvConfig::from_env().context("Failed to load mail config")?;
        let report = ReportEnvConfig::from_env();

        Ok(Self {
            fetch,
            mail,
            report_dir: report.report_dir,
            keywords_file: report.keywords_file,
        })
    }

    /// Keyword taxonomy from `KEYWORDS_FILE`, or the built-in one.
    pub fn load_keywords(&self) -> Result<KeywordConfig> {
        KeywordConfig::load_or_builtin(self.keywords_file.as_deref())
            .context("Failed to load keyword configuration")
    }

    pub fn mail_enabled(&self) -> bool {
        self.mail.is_some()
    }
}
