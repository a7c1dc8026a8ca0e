//! Environment-driven settings.
//!
//! Everything is read once at startup; a missing remote-service
//! credential is a configuration error here, never a per-query failure.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Which acquisition strategy this deployment uses. Exactly one is
/// active; the dispatcher never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Local headless browser via chromiumoxide.
    Browser,
    /// Remote browser-as-a-service endpoint (Browserless-style).
    Remote,
    /// Plain HTTP GET plus static HTML parsing. Cheapest, but fails
    /// against retailers that render results client-side.
    #[default]
    Fetch,
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browser" => Ok(Strategy::Browser),
            "remote" => Ok(Strategy::Remote),
            "fetch" | "static" => Ok(Strategy::Fetch),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Runtime settings, sourced from the environment.
#[derive(Clone)]
pub struct Settings {
    pub strategy: Strategy,
    /// Base URL of the remote browser service.
    pub browserless_url: String,
    /// Token for the remote browser service. Required when
    /// `strategy == Remote`.
    pub browserless_token: Option<String>,
    /// Overall per-retailer request budget.
    pub request_timeout: Duration,
    /// In-page wait for the item-container selector to appear.
    pub selector_timeout: Duration,
    /// Headless mode for the local browser strategy.
    pub headless: bool,
}

impl Settings {
    pub const DEFAULT_BROWSERLESS_URL: &'static str = "https://production-sfo.browserless.io";

    /// Per-retailer request ceiling; a single slow retailer can never
    /// stall a query past this.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Bounded wait for the item-container selector on dynamic pages.
    pub const DEFAULT_SELECTOR_TIMEOUT: Duration = Duration::from_secs(20);

    /// Read settings from the environment (`.env` is loaded by main).
    pub fn from_env() -> Result<Self, ConfigError> {
        let strategy = match std::env::var("SMARTSHOPPER_STRATEGY") {
            Ok(value) => value.parse()?,
            Err(_) => Strategy::default(),
        };

        let settings = Self {
            strategy,
            browserless_url: std::env::var("BROWSERLESS_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BROWSERLESS_URL.to_string()),
            browserless_token: std::env::var("BROWSERLESS_API_KEY").ok(),
            request_timeout: duration_from_env(
                "SMARTSHOPPER_TIMEOUT_SECS",
                Self::DEFAULT_REQUEST_TIMEOUT,
            )?,
            selector_timeout: duration_from_env(
                "SMARTSHOPPER_SELECTOR_TIMEOUT_SECS",
                Self::DEFAULT_SELECTOR_TIMEOUT,
            )?,
            headless: std::env::var("SMARTSHOPPER_HEADLESS")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.strategy == Strategy::Remote && self.browserless_token.is_none() {
            return Err(ConfigError::MissingRemoteToken);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("strategy", &self.strategy)
            .field("browserless_url", &self.browserless_url)
            .field(
                "browserless_token",
                &self.browserless_token.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout", &self.request_timeout)
            .field("selector_timeout", &self.selector_timeout)
            .field("headless", &self.headless)
            .finish()
    }
}

fn duration_from_env(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(value) => {
            let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            })?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(default),
    }
}
