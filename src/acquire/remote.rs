//! Remote browser service strategy.
//!
//! Delegates navigation and rendering to a Browserless-style automation
//! endpoint and takes back the rendered HTML, so extraction stays local
//! and identical to the other strategies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::{PageFetcher, USER_AGENT};
use crate::error::AcquireError;

pub struct RemoteFetcher {
    client: Client,
    base_url: String,
    token: String,
    selector_timeout: Duration,
}

impl RemoteFetcher {
    pub fn new(
        base_url: String,
        token: String,
        request_timeout: Duration,
        selector_timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            selector_timeout,
        }
    }

    fn content_endpoint(&self) -> String {
        format!("{}/content?token={}", self.base_url, self.token)
    }
}

#[async_trait]
impl PageFetcher for RemoteFetcher {
    async fn fetch_page(&self, url: &str, wait_selector: &str) -> Result<String, AcquireError> {
        debug!(%url, wait_selector, "remote browser fetch");

        let body = json!({
            "url": url,
            "gotoOptions": { "waitUntil": "domcontentloaded" },
            "waitForSelector": {
                "selector": wait_selector,
                "timeout": self.selector_timeout.as_millis() as u64,
            },
        });

        let response = self
            .client
            .post(self.content_endpoint())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Keep the endpoint's own status and body for diagnostics.
            let body = response.text().await.unwrap_or_default();
            return Err(AcquireError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
