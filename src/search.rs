//! Query dispatcher: fans one query out to the requested retailers and
//! merges whatever succeeds.
//!
//! Retailer calls are independent and run concurrently, each under its
//! own timeout; a failed or slow retailer contributes nothing and never
//! aborts the others. Results concatenate in requested-retailer order,
//! not completion order.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use scraper::Html;
use tracing::{debug, info, warn};

use crate::acquire::PageFetcher;
use crate::config::Settings;
use crate::error::{RetailerError, SearchError};
use crate::models::Product;
use crate::retailers::{Retailer, RetailerRegistry};

pub struct SearchService {
    registry: RetailerRegistry,
    fetcher: Arc<dyn PageFetcher>,
    /// Per-retailer ceiling. Retailers run concurrently, so this also
    /// bounds the whole query.
    retailer_budget: Duration,
}

impl SearchService {
    pub fn new(registry: RetailerRegistry, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            registry,
            fetcher,
            retailer_budget: Settings::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_retailer_budget(mut self, budget: Duration) -> Self {
        self.retailer_budget = budget;
        self
    }

    pub fn known_sources(&self) -> Vec<String> {
        self.registry.ids()
    }

    /// Run one query against the requested retailers.
    ///
    /// Validation failures are the only error outcome; per-retailer
    /// failures are logged and reduce the result count. Total failure
    /// returns an empty collection, indistinguishable here from "no
    /// results".
    pub async fn search(
        &self,
        query: &str,
        sources: &[String],
    ) -> Result<Vec<Product>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::Validation(
                "search query must not be empty".to_string(),
            ));
        }
        if sources.is_empty() {
            return Err(SearchError::Validation(
                "at least one source is required".to_string(),
            ));
        }

        // Unknown identifiers are skipped, not errors, so callers may
        // offer a superset of sources.
        let retailers: Vec<&Retailer> = sources
            .iter()
            .filter_map(|id| {
                let retailer = self.registry.get(id);
                if retailer.is_none() {
                    debug!(source = %id, "ignoring unknown source");
                }
                retailer
            })
            .collect();

        let outcomes = join_all(
            retailers
                .iter()
                .map(|retailer| self.search_one(retailer, query)),
        )
        .await;

        let mut products = Vec::new();
        for outcome in outcomes {
            products.extend(outcome);
        }
        info!(query, total = products.len(), "search complete");
        Ok(products)
    }

    /// Query a single retailer, converting every failure mode into an
    /// empty contribution.
    async fn search_one(&self, retailer: &Retailer, query: &str) -> Vec<Product> {
        let url = retailer.search_url(query);
        debug!(retailer = retailer.id, %url, "querying retailer");

        let attempt = async {
            let html = self.fetcher.fetch_page(&url, retailer.wait_selector).await?;
            extract_products(retailer, &html)
        };

        match tokio::time::timeout(self.retailer_budget, attempt).await {
            Ok(Ok(products)) => {
                info!(retailer = retailer.id, count = products.len(), "retailer succeeded");
                products
            }
            Ok(Err(err)) => {
                warn!(retailer = retailer.id, error = %err, "retailer query failed");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    retailer = retailer.id,
                    budget = ?self.retailer_budget,
                    "retailer query timed out"
                );
                Vec::new()
            }
        }
    }
}

/// Parse and extract synchronously so the non-`Send` DOM never crosses
/// an await point.
fn extract_products(retailer: &Retailer, html: &str) -> Result<Vec<Product>, RetailerError> {
    let doc = Html::parse_document(html);
    Ok((retailer.adapter)(&doc)?)
}
