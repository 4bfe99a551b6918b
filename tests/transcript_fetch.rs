use chrono::NaiveDate;
use sectorscope::config::FetchEnvConfig;
use sectorscope::domain::errors::FetchError;
use sectorscope::domain::ports::NewsSource;
use sectorscope::infrastructure::news::BroadcastTranscriptSource;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"<html><body>
<nav>首页</nav>
<div class="entry-content">
  <p>央行下调利率,加快推进光伏产业发展。</p>
  <p>长三角一体化建设提速。</p>
</div>
</body></html>"#;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 14).unwrap()
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8")
}

fn link_page(href: &str) -> String {
    format!(
        r#"<html><body><ul><li><a href="{}">2025年08月14日新闻联播文字版</a></li></ul></body></html>"#,
        href
    )
}

fn source(server: &MockServer) -> BroadcastTranscriptSource {
    let config = FetchEnvConfig {
        base_url: format!("{}/", server.uri()),
        timeout_secs: 5,
        max_retries: 0,
        ..FetchEnvConfig::default()
    };
    BroadcastTranscriptSource::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_via_search_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/search/2025/08/14/"))
        .respond_with(html(&link_page("/2025/08/14/xwlb.html")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2025/08/14/xwlb.html"))
        .respond_with(html(ARTICLE))
        .expect(1)
        .mount(&server)
        .await;

    let text = source(&server).fetch(date()).await.unwrap();
    assert_eq!(text, "央行下调利率,加快推进光伏产业发展。\n长三角一体化建设提速。");
}

#[tokio::test]
async fn test_fetch_falls_back_to_index_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/search/"))
        .respond_with(html("<html><body>没有结果</body></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&link_page("2025/08/14/xwlb.html")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2025/08/14/xwlb.html"))
        .respond_with(html(ARTICLE))
        .mount(&server)
        .await;

    let text = source(&server).fetch(date()).await.unwrap();
    assert!(text.starts_with("央行下调利率"));
}

#[tokio::test]
async fn test_missing_link_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("<html><body><a href=\"/x\">其他新闻</a></body></html>"))
        .mount(&server)
        .await;

    let err = source(&server).fetch(date()).await.unwrap_err();
    match err {
        FetchError::LinkNotFound { date } => assert_eq!(date, "2025年08月14日"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_search_page_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = source(&server).fetch(date()).await.unwrap_err();
    assert!(matches!(err, FetchError::Http { ref reason, .. } if reason.contains("404")));
}

#[tokio::test]
async fn test_article_without_container_uses_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/search/"))
        .respond_with(html(&link_page("/a.html")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a.html"))
        .respond_with(html("<html><body><p>加快推进光伏产业发展。</p></body></html>"))
        .mount(&server)
        .await;

    let text = source(&server).fetch(date()).await.unwrap();
    assert_eq!(text, "加快推进光伏产业发展。");
}

#[tokio::test]
async fn test_blank_article_is_empty_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/search/"))
        .respond_with(html(&link_page("/a.html")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a.html"))
        .respond_with(html("<html><body>  </body></html>"))
        .mount(&server)
        .await;

    let err = source(&server).fetch(date()).await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyContent { .. }));
}
