//! Local browser automation strategy.
//!
//! Drives a disposable headless Chromium via chromiumoxide (CDP). Every
//! call launches a fresh instance and tears it down on all exit paths;
//! leaking a browser process is a correctness bug, and instances are
//! never shared between concurrent retailer calls.

#[cfg(feature = "browser")]
use std::time::{Duration, Instant};
#[cfg(not(feature = "browser"))]
use std::time::Duration;

use async_trait::async_trait;
#[cfg(feature = "browser")]
use tracing::{debug, info};

#[cfg(feature = "browser")]
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
#[cfg(feature = "browser")]
use chromiumoxide::{Browser, BrowserConfig, Page};
#[cfg(feature = "browser")]
use futures::StreamExt;

use super::PageFetcher;
#[cfg(feature = "browser")]
use super::USER_AGENT;
use crate::error::AcquireError;

pub struct BrowserFetcher {
    headless: bool,
    selector_timeout: Duration,
}

impl BrowserFetcher {
    pub fn new(headless: bool, selector_timeout: Duration) -> Self {
        Self {
            headless,
            selector_timeout,
        }
    }
}

#[cfg(feature = "browser")]
impl BrowserFetcher {
    /// Common Chrome executable paths to check.
    const CHROME_PATHS: &'static [&'static str] = &[
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
    ];

    fn find_chrome() -> Result<std::path::PathBuf, AcquireError> {
        for path in Self::CHROME_PATHS {
            let p = std::path::Path::new(path);
            if p.exists() {
                return Ok(p.to_path_buf());
            }
        }
        for cmd in &["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"] {
            if let Ok(output) = std::process::Command::new("which").arg(cmd).output() {
                if output.status.success() {
                    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if !path.is_empty() {
                        return Ok(std::path::PathBuf::from(path));
                    }
                }
            }
        }
        Err(AcquireError::Browser(
            "Chrome/Chromium not found; install it or use another strategy".to_string(),
        ))
    }

    async fn launch(&self) -> Result<(Browser, tokio::task::JoinHandle<()>), AcquireError> {
        let chrome_path = Self::find_chrome()?;

        let mut builder = BrowserConfig::builder().chrome_executable(chrome_path);
        if !self.headless {
            builder = builder.with_head();
        }
        builder = builder
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox")
            .arg("--disable-gpu");

        let config = builder.build().map_err(AcquireError::Browser)?;

        info!(headless = self.headless, "launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AcquireError::Browser(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, handler_task))
    }

    async fn drive(&self, browser: &Browser, url: &str, wait_selector: &str) -> Result<String, AcquireError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| AcquireError::Browser(e.to_string()))?;

        // Realistic identity, set before any navigation.
        page.execute(SetUserAgentOverrideParams::new(USER_AGENT.to_string()))
            .await
            .map_err(|e| AcquireError::Browser(e.to_string()))?;

        debug!(%url, "navigating");
        page.goto(url)
            .await
            .map_err(|e| AcquireError::Browser(e.to_string()))?;

        self.wait_for_selector(&page, wait_selector).await?;

        let content = page
            .content()
            .await
            .map_err(|e| AcquireError::Browser(e.to_string()))?;

        let _ = page.close().await;
        Ok(content)
    }

    /// Poll for the item-container selector within the bounded wait.
    async fn wait_for_selector(&self, page: &Page, selector: &str) -> Result<(), AcquireError> {
        let deadline = Instant::now() + self.selector_timeout;
        loop {
            if page.find_element(selector).await.is_ok() {
                debug!(selector, "selector appeared");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(AcquireError::Timeout(self.selector_timeout));
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    }
}

#[cfg(feature = "browser")]
#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch_page(&self, url: &str, wait_selector: &str) -> Result<String, AcquireError> {
        let (mut browser, handler_task) = self.launch().await?;

        // Run the navigation, then tear the instance down whatever
        // happened: close asks Chromium to exit, wait reaps the process.
        let result = self.drive(&browser, url, wait_selector).await;

        let _ = browser.close().await;
        let _ = browser.wait().await;
        handler_task.abort();

        result
    }
}

// Stub for when browser feature is disabled.
#[cfg(not(feature = "browser"))]
#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch_page(&self, _url: &str, _wait_selector: &str) -> Result<String, AcquireError> {
        Err(AcquireError::BrowserUnavailable)
    }
}
