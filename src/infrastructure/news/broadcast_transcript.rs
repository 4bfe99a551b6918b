//! Evening broadcast transcript scraper.
//!
//! The transcript site publishes one article per day, titled
//! `YYYY年MM月DD日新闻联播文字版`. Lookup goes through the site search page
//! and falls back to the index page.

use crate::config::FetchEnvConfig;
use crate::domain::errors::FetchError;
use crate::domain::ports::{DATE_LABEL_FORMAT, NewsSource};
use crate::infrastructure::core::HttpClientFactory;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest_middleware::ClientWithMiddleware;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

/// Article containers, tried in order.
const CONTENT_SELECTORS: [&str; 3] = ["div.entry-content", "div.article-content", "div#content"];

/// Lines kept when falling back to the whole `<body>`.
const BODY_FALLBACK_LINES: usize = 50;

/// `2025年08月14日`
pub fn display_date(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// Anchor text identifying the transcript of `date`.
pub fn link_title(date: NaiveDate) -> String {
    format!("{}新闻联播文字版", display_date(date))
}

/// First `<a href>` whose trimmed text contains `title`, resolved against `base`.
pub fn find_article_link(html: &str, base: &Url, title: &str) -> Option<Url> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").ok()?;

    document
        .select(&selector)
        .filter(|a| a.text().collect::<String>().trim().contains(title))
        .filter_map(|a| a.value().attr("href"))
        .find_map(|href| base.join(href).ok())
}

fn clean_lines<'a>(texts: impl Iterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    texts
        .flat_map(|t| t.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Transcript text from an article page.
///
/// Uses the first matching content container; without one, the first
/// [`BODY_FALLBACK_LINES`] non-blank lines of `<body>`.
pub fn extract_article_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector in CONTENT_SELECTORS {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        if let Some(container) = document.select(&parsed).next() {
            let text = clean_lines(container.text()).collect::<Vec<_>>().join("\n");
            if !text.is_empty() {
                debug!("Extracted {} chars via {}", text.chars().count(), selector);
                return Some(text);
            }
        }
    }

    warn!("No content container matched, falling back to <body> text");
    let body = Selector::parse("body").ok()?;
    let text = document
        .select(&body)
        .next()
        .map(|b| {
            clean_lines(b.text())
                .take(BODY_FALLBACK_LINES)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    (!text.is_empty()).then_some(text)
}

/// [`NewsSource`] backed by the transcript website.
pub struct BroadcastTranscriptSource {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl BroadcastTranscriptSource {
    pub fn new(config: &FetchEnvConfig) -> Result<Self, FetchError> {
        Self::with_client(HttpClientFactory::create_client(config), &config.base_url)
    }

    pub fn with_client(client: ClientWithMiddleware, base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    pub fn search_url(&self, date: NaiveDate) -> Result<Url, FetchError> {
        let path = format!("search/{}/{}/", date.format("%Y/%m/%d"), link_title(date));
        self.base_url.join(&path).map_err(|e| FetchError::InvalidUrl {
            url: path,
            reason: e.to_string(),
        })
    }

    async fn get_html(&self, url: &Url) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let http_error = |reason: String| FetchError::Http {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| http_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(format!("HTTP {}", status)));
        }
        response.text().await.map_err(|e| http_error(e.to_string()))
    }

    async fn locate_article(&self, date: NaiveDate) -> Result<Url, FetchError> {
        let title = link_title(date);

        let search_url = self.search_url(date)?;
        let search_page = self.get_html(&search_url).await?;
        if let Some(link) = find_article_link(&search_page, &self.base_url, &title) {
            return Ok(link);
        }

        warn!("No link for {} on search page, trying index page", title);
        match self.get_html(&self.base_url).await {
            Ok(index_page) => {
                if let Some(link) = find_article_link(&index_page, &self.base_url, &title) {
                    return Ok(link);
                }
            }
            Err(e) => warn!("Index page lookup failed: {}", e),
        }

        Err(FetchError::LinkNotFound {
            date: display_date(date),
        })
    }
}

#[async_trait]
impl NewsSource for BroadcastTranscriptSource {
    async fn fetch(&self, date: NaiveDate) -> Result<String, FetchError> {
        let article_url = self.locate_article(date).await?;
        info!("Found transcript page: {}", article_url);

        let article = self.get_html(&article_url).await?;
        let text = extract_article_text(&article).ok_or_else(|| FetchError::EmptyContent {
            url: article_url.to_string(),
        })?;

        info!("Fetched transcript for {} ({} chars)", display_date(date), text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 14).unwrap()
    }

    #[test]
    fn test_link_title_uses_zero_padded_date() {
        assert_eq!(display_date(date()), "2025年08月14日");
        assert_eq!(link_title(date()), "2025年08月14日新闻联播文字版");
    }

    #[test]
    fn test_find_article_link_matches_trimmed_anchor_text() {
        let base = Url::parse("http://mrxwlb.com/").unwrap();
        let html = r#"<html><body>
            <a href="/other.html">2025年08月13日新闻联播文字版</a>
            <a href="/2025/08/14/xwlb.html">
                2025年08月14日新闻联播文字版
            </a>
        </body></html>"#;

        let link = find_article_link(html, &base, &link_title(date())).unwrap();
        assert_eq!(link.as_str(), "http://mrxwlb.com/2025/08/14/xwlb.html");
        assert!(find_article_link(html, &base, "2025年08月15日新闻联播文字版").is_none());
    }

    #[test]
    fn test_extract_uses_first_matching_container() {
        let html = r#"<html><body>
            <div id="content">wrong container</div>
            <div class="entry-content">
                <p>  央行下调利率。 </p>
                <p></p>
                <p>加快推进光伏产业发展。</p>
            </div>
        </body></html>"#;
        assert_eq!(
            extract_article_text(html).unwrap(),
            "央行下调利率。\n加快推进光伏产业发展。"
        );
    }

    #[test]
    fn test_extract_falls_back_to_body_lines() {
        let lines: String = (0..60).map(|i| format!("<p>第{}条</p>", i)).collect();
        let html = format!("<html><body>{}</body></html>", lines);

        let text = extract_article_text(&html).unwrap();
        assert_eq!(text.lines().count(), BODY_FALLBACK_LINES);
        assert!(text.starts_with("第0条"));
    }

    #[test]
    fn test_extract_empty_page_is_none() {
        assert!(extract_article_text("<html><body>   </body></html>").is_none());
    }
}
