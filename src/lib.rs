//! Multi-retailer product search and price comparison.
//!
//! The pipeline: an acquisition strategy obtains a retailer's rendered
//! search-results page, a retailer adapter extracts a bounded set of
//! normalized product records from it, and the dispatcher merges the
//! per-retailer successes into one collection while swallowing
//! per-retailer failures.

pub mod acquire;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod retailers;
pub mod search;
pub mod server;

pub use models::Product;
pub use search::SearchService;
