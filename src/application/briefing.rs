//! Daily briefing: fetch, analyze, render, archive, deliver.

use crate::application::analysis::SectorAnalyzer;
use crate::application::reporting::{HtmlReport, subject_line};
use crate::domain::ports::{DATE_LABEL_FORMAT, NewsSource, OutgoingReport, ReportDelivery};
use crate::infrastructure::ReportArchive;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingOutcome {
    pub date: NaiveDate,
    pub report_path: PathBuf,
    pub top_sector: Option<String>,
    pub sector_count: usize,
    /// False when mail is disabled or delivery failed
    pub delivered: bool,
}

pub struct BriefingTask {
    source: Arc<dyn NewsSource>,
    analyzer: Arc<SectorAnalyzer>,
    archive: ReportArchive,
    delivery: Option<Arc<dyn ReportDelivery>>,
    source_site: String,
}

impl BriefingTask {
    pub fn new(
        source: Arc<dyn NewsSource>,
        analyzer: Arc<SectorAnalyzer>,
        archive: ReportArchive,
    ) -> Self {
        Self {
            source,
            analyzer,
            archive,
            delivery: None,
            source_site: String::new(),
        }
    }

    pub fn with_delivery(mut self, delivery: Arc<dyn ReportDelivery>) -> Self {
        self.delivery = Some(delivery);
        self
    }

    /// Site named in failure notifications.
    pub fn with_source_site(mut self, site: impl Into<String>) -> Self {
        self.source_site = site.into();
        self
    }

    pub async fn run(&self, date: NaiveDate) -> Result<BriefingOutcome> {
        let label = date.format(DATE_LABEL_FORMAT).to_string();
        info!("===== Starting briefing for {} =====", label);

        let text = match self.source.fetch(date).await {
            Ok(text) => text,
            Err(e) => {
                error!("Transcript fetch failed for {}: {}", label, e);
                self.notify_failure(&label, &e).await;
                return Err(e).context(format!("Failed to fetch transcript for {}", label));
            }
        };
        info!("Transcript fetched ({} chars), analyzing", text.chars().count());

        let analysis = self.analyzer.analyze(&text);
        let html = HtmlReport::render(&text, &analysis, date, Local::now().naive_local());
        let report_path = match self.archive.save(&html, date) {
            Ok(path) => path,
            Err(e) => {
                error!("Report archive failed for {}: {:#}", label, e);
                self.notify_failure(&label, &format!("程序异常：{:#}", e)).await;
                return Err(e);
            }
        };

        let top_sector = analysis.top_sector().map(|s| s.sector.clone());
        let delivered = match &self.delivery {
            Some(delivery) => {
                let report = OutgoingReport::html(subject_line(date, &analysis), html);
                match delivery.deliver(&report).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Report delivery failed: {}", e);
                        false
                    }
                }
            }
            None => {
                info!("Mail delivery disabled, report archived only");
                false
            }
        };

        info!(
            "===== Briefing for {} complete: top sector {} =====",
            label,
            top_sector.as_deref().unwrap_or("无")
        );
        Ok(BriefingOutcome {
            date,
            report_path,
            top_sector,
            sector_count: analysis.sector_summary.len(),
            delivered,
        })
    }

    async fn notify_failure(&self, label: &str, cause: &(dyn fmt::Display + Sync)) {
        let Some(delivery) = &self.delivery else {
            return;
        };
        let report = failure_notification(label, cause, &self.source_site);
        if let Err(e) = delivery.deliver(&report).await {
            warn!("Failure notification could not be sent: {}", e);
        }
    }
}

/// Plain-text alert sent when a run fails before the report goes out.
pub fn failure_notification(label: &str, cause: &dyn fmt::Display, site: &str) -> OutgoingReport {
    let subject = format!("【交易爬虫错误】{} 新闻联播抓取失败", label);
    let body = format!(
        "日期：{label}\n\
         错误信息：{cause}\n\
         建议排查：\n\
         1. 目标网站URL结构是否变更\n\
         2. 网络是否正常（可手动访问{site}验证）\n\
         3. 邮件配置是否正确（尤其是授权码）\n"
    );
    OutgoingReport::text(subject, body)
}
