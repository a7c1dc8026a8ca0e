//! Acquisition strategies: interchangeable ways to obtain a retailer's
//! rendered search-results page.
//!
//! All three variants return the page as an HTML string, so retailer
//! adapters parse one representation no matter which transport is
//! configured.

mod browser;
mod fetch;
mod remote;

use std::sync::Arc;

use async_trait::async_trait;

pub use browser::BrowserFetcher;
pub use fetch::StaticFetcher;
pub use remote::RemoteFetcher;

use crate::config::{Settings, Strategy};
use crate::error::{AcquireError, ConfigError};

/// Client identity presented to retailers. Plain library identifiers
/// get blocked outright.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// One acquisition call: fetch the search URL and return rendered HTML.
///
/// `wait_selector` marks the retailer's item containers; strategies
/// that render JavaScript wait (bounded) for it before snapshotting the
/// page. The static strategy ignores it.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str, wait_selector: &str) -> Result<String, AcquireError>;
}

/// Build the configured strategy. Exactly one is active per deployment.
pub fn build_fetcher(settings: &Settings) -> Result<Arc<dyn PageFetcher>, ConfigError> {
    match settings.strategy {
        Strategy::Browser => Ok(Arc::new(BrowserFetcher::new(
            settings.headless,
            settings.selector_timeout,
        ))),
        Strategy::Remote => {
            let token = settings
                .browserless_token
                .clone()
                .ok_or(ConfigError::MissingRemoteToken)?;
            Ok(Arc::new(RemoteFetcher::new(
                settings.browserless_url.clone(),
                token,
                settings.request_timeout,
                settings.selector_timeout,
            )))
        }
        Strategy::Fetch => Ok(Arc::new(StaticFetcher::new(settings.request_timeout))),
    }
}
