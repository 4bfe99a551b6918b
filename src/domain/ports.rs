use crate::domain::errors::{DeliveryError, FetchError};
use async_trait::async_trait;
use chrono::NaiveDate;

/// How broadcast dates are written in titles and subjects: `2025年08月14日`.
pub const DATE_LABEL_FORMAT: &str = "%Y年%m月%d日";

/// Supplies the plain-text transcript for a broadcast date.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self, date: NaiveDate) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBody {
    Html(String),
    Text(String),
}

/// A finished report or notification ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReport {
    pub subject: String,
    pub body: ReportBody,
}

impl OutgoingReport {
    pub fn html(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: ReportBody::Html(body.into()),
        }
    }

    pub fn text(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: ReportBody::Text(body.into()),
        }
    }
}

/// Delivers reports to their audience (mail, chat, ...).
#[async_trait]
pub trait ReportDelivery: Send + Sync {
    async fn deliver(&self, report: &OutgoingReport) -> Result<(), DeliveryError>;
}
