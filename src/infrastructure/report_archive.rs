use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Stores rendered reports as `{YYYYMMDD}_news_trading_report.html`.
pub struct ReportArchive {
    report_dir: PathBuf,
}

impl ReportArchive {
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        Self {
            report_dir: report_dir.into(),
        }
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn file_name(date: NaiveDate) -> String {
        format!("{}_news_trading_report.html", date.format("%Y%m%d"))
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.report_dir.join(Self::file_name(date))
    }

    /// Writes the report, replacing any earlier one for the same date.
    pub fn save(&self, html: &str, date: NaiveDate) -> Result<PathBuf> {
        if !self.report_dir.exists() {
            fs::create_dir_all(&self.report_dir).context(format!(
                "Failed to create report directory {}",
                self.report_dir.display()
            ))?;
        }

        let file_path = self.path_for(date);

        // Atomic write: write to temp file then rename
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, html).context("Failed to write temp report file")?;
        fs::rename(&temp_path, &file_path).context("Failed to rename report file")?;

        info!("Saved report to {:?}", file_path);
        Ok(file_path)
    }

    pub fn load(&self, date: NaiveDate) -> Result<Option<String>> {
        let file_path = self.path_for(date);
        if !file_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&file_path)
            .context(format!("Failed to read report {}", file_path.display()))?;
        Ok(Some(content))
    }
}
