//! Retailer adapters: per-retailer extraction of normalized product
//! records from search-results markup.
//!
//! Each adapter is pure extraction logic written against a parsed
//! [`scraper::Html`] document, so it behaves identically no matter which
//! acquisition strategy produced the page.

mod amazon;
mod ebay;
mod walmart;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ExtractError;
use crate::models::Product;

/// Cap on items extracted per retailer per query. Page order is the
/// retailer's own relevance ranking; no re-ranking happens here.
pub const MAX_ITEMS: usize = 10;

/// Everything the dispatcher needs to query one retailer: where to
/// search, what to wait for, and how to extract.
pub struct Retailer {
    /// Identifier callers use in the `sources` set.
    pub id: &'static str,
    /// Base origin for resolving relative product links.
    pub origin: &'static str,
    /// Search URL template with a `{query}` placeholder.
    pub search_template: &'static str,
    /// Selector that marks the item containers; dynamic-render
    /// strategies wait for it before extraction.
    pub wait_selector: &'static str,
    /// Extraction function for this retailer's markup.
    pub adapter: fn(&Html) -> Result<Vec<Product>, ExtractError>,
}

impl Retailer {
    /// Build the search URL for a query, percent-encoding it.
    pub fn search_url(&self, query: &str) -> String {
        self.search_template
            .replace("{query}", &urlencoding::encode(query))
    }
}

/// Known retailers, constructed once at startup and passed into the
/// dispatcher. Iteration order is fixed but output order follows the
/// caller's requested order, not this one.
pub struct RetailerRegistry {
    retailers: Vec<Retailer>,
}

impl RetailerRegistry {
    /// Registry with every supported retailer.
    pub fn with_known_retailers() -> Self {
        Self {
            retailers: vec![walmart::retailer(), amazon::retailer(), ebay::retailer()],
        }
    }

    /// Look up a retailer by identifier. Unknown identifiers return
    /// `None`; the dispatcher treats that as "silently skip".
    pub fn get(&self, id: &str) -> Option<&Retailer> {
        self.retailers.iter().find(|r| r.id == id)
    }

    /// All known retailer identifiers.
    pub fn ids(&self) -> Vec<String> {
        self.retailers.iter().map(|r| r.id.to_string()).collect()
    }
}

impl Default for RetailerRegistry {
    fn default() -> Self {
        Self::with_known_retailers()
    }
}

/// Text content of the first element matching `selector` inside `el`,
/// whitespace-trimmed. `None` when nothing matches or the text is empty.
fn select_text(el: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text: String = el.select(selector).next()?.text().collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Attribute value of the first element matching `selector` inside `el`.
fn select_attr(el: &ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    el.select(selector)
        .next()?
        .value()
        .attr(attr)
        .map(|s| s.to_string())
}

/// Resolve an href to an absolute URL against the retailer origin.
/// Already-absolute hrefs pass through untouched.
fn absolute_url(origin: &str, href: &str) -> Option<String> {
    let base = Url::parse(origin).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let registry = RetailerRegistry::with_known_retailers();
        assert!(registry.get("Walmart").is_some());
        assert!(registry.get("Amazon").is_some());
        assert!(registry.get("eBay").is_some());
        assert!(registry.get("FooMart").is_none());
    }

    #[test]
    fn test_search_url_encodes_query() {
        let registry = RetailerRegistry::with_known_retailers();
        let walmart = registry.get("Walmart").unwrap();
        assert_eq!(
            walmart.search_url("coffee maker"),
            "https://www.walmart.com/search?q=coffee%20maker"
        );
    }

    #[test]
    fn test_absolute_url_resolution() {
        assert_eq!(
            absolute_url("https://www.walmart.com", "/ip/widget/123").as_deref(),
            Some("https://www.walmart.com/ip/widget/123")
        );
        assert_eq!(
            absolute_url("https://www.walmart.com", "https://other.example/x").as_deref(),
            Some("https://other.example/x")
        );
        assert_eq!(absolute_url("not a url", "/x"), None);
    }
}
