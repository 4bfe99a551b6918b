//! Report archive and keyword file locations.

use std::env;
use std::path::PathBuf;

/// Output and input paths
#[derive(Debug, Clone)]
pub struct ReportEnvConfig {
    pub report_dir: PathBuf,
    /// `None` selects the built-in taxonomy
    pub keywords_file: Option<PathBuf>,
}

impl ReportEnvConfig {
    pub fn from_env() -> Self {
        let report_dir = env::var("REPORT_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_report_dir);
        let keywords_file = env::var("KEYWORDS_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Self {
            report_dir,
            keywords_file,
        }
    }
}

fn default_report_dir() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("news_trading_reports")
}
