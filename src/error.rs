//! Error types for acquisition, extraction, and search dispatch.

use std::time::Duration;

use thiserror::Error;

/// Failure to obtain a retailer's search-results page.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("timed out after {0:?} waiting for page content")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote browser service returned {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("browser error: {0}")]
    Browser(String),
    #[error("browser support not compiled in; rebuild with --features browser")]
    BrowserUnavailable,
}

/// Failure to extract product records from an acquired page.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No item containers matched at all: the markup changed, or the
    /// request was blocked or redirected.
    #[error("no product cards matched `{selector}`")]
    StructuralMismatch { selector: String },
}

/// Any per-retailer failure. Caught at the dispatcher boundary and
/// converted to zero contribution, never propagated to the caller.
#[derive(Debug, Error)]
pub enum RetailerError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Errors surfaced to the caller of a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),
    #[error("search failed: {0}")]
    Internal(String),
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BROWSERLESS_API_KEY must be set when the remote strategy is active")]
    MissingRemoteToken,
    #[error("unknown acquisition strategy `{0}` (expected browser, remote, or fetch)")]
    UnknownStrategy(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
