//! Static fetch+parse strategy: a plain GET with browser-like headers.
//!
//! No JavaScript runs, so retailers that populate results client-side
//! come back without item containers and fail downstream as a
//! structural mismatch. That is a known limit of this strategy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use tracing::debug;

use super::{PageFetcher, USER_AGENT};
use crate::error::AcquireError;

pub struct StaticFetcher {
    client: Client,
}

impl StaticFetcher {
    pub fn new(timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_page(&self, url: &str, _wait_selector: &str) -> Result<String, AcquireError> {
        debug!(%url, "static fetch");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let fetcher = StaticFetcher::new(Duration::from_secs(5));
        let html = fetcher
            .fetch_page(&format!("{}/search", server.uri()), "[data-item-id]")
            .await
            .unwrap();
        assert_eq!(html, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let fetcher = StaticFetcher::new(Duration::from_secs(5));
        let err = fetcher
            .fetch_page(&server.uri(), "[data-item-id]")
            .await
            .unwrap_err();
        assert!(matches!(err, AcquireError::Transport(_)));
    }
}
