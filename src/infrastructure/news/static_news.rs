use crate::domain::errors::FetchError;
use crate::domain::ports::NewsSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::info;

/// Serves transcripts from memory. Used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticNewsSource {
    by_date: HashMap<NaiveDate, String>,
    fallback: Option<String>,
}

impl StaticNewsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same text for every date.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            by_date: HashMap::new(),
            fallback: Some(text.into()),
        }
    }

    pub fn with_transcript(mut self, date: NaiveDate, text: impl Into<String>) -> Self {
        self.by_date.insert(date, text.into());
        self
    }
}

#[async_trait]
impl NewsSource for StaticNewsSource {
    async fn fetch(&self, date: NaiveDate) -> Result<String, FetchError> {
        let text = self
            .by_date
            .get(&date)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| FetchError::LinkNotFound {
                date: date.to_string(),
            })?;
        info!("Serving static transcript for {} ({} chars)", date, text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dated_transcript_wins_over_fallback() {
        let day = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        let source = StaticNewsSource::always("默认文本。").with_transcript(day, "当日文本。");

        assert_eq!(source.fetch(day).await.unwrap(), "当日文本。");
        assert_eq!(source.fetch(day.succ_opt().unwrap()).await.unwrap(), "默认文本。");
    }

    #[tokio::test]
    async fn test_unknown_date_is_link_not_found() {
        let source = StaticNewsSource::new();
        let day = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        assert!(matches!(
            source.fetch(day).await,
            Err(FetchError::LinkNotFound { .. })
        ));
    }
}
