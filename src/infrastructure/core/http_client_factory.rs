use crate::config::FetchEnvConfig;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;
use tracing::warn;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client with retry middleware and browser-like headers
    pub fn create_client(config: &FetchEnvConfig) -> ClientWithMiddleware {
        // Retry policy:
        // - Exponential backoff starting at the configured base delay
        // - Retries only transient failures (connect errors, 5xx, 429)
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(
                Duration::from_secs(config.retry_backoff_secs.max(1)),
                Duration::from_secs(config.retry_backoff_secs.max(1) * 16),
            )
            .build_with_max_retries(config.max_retries);

        let client = Client::builder()
            .default_headers(Self::default_headers(&config.user_agent))
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    fn default_headers(user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(user_agent) {
            Ok(value) => {
                headers.insert(USER_AGENT, value);
            }
            Err(e) => warn!("Ignoring invalid FETCH_USER_AGENT: {}", e),
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"));
        headers
    }
}
