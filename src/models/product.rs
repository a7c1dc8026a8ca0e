//! The normalized product record shared by all retailer adapters.

use serde::{Deserialize, Serialize};

/// One product extracted from a retailer's search-results page.
///
/// Constructed once during extraction and immutable afterwards. A record
/// only exists if id, name, price, and URL were all present and valid;
/// candidates missing any required field are dropped at extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Retailer-assigned item identifier. Opaque, and only unique within
    /// its source retailer.
    pub id: String,
    /// Product title, trimmed and non-empty.
    pub name: String,
    /// Positive finite price in the retailer's native currency.
    pub price: f64,
    /// Retailer identifier this record came from.
    pub source: String,
    /// Absolute product URL, resolved against the retailer origin.
    #[serde(rename = "productUrl")]
    pub product_url: String,
    /// Star rating, when the retailer exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Review count, when the retailer exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u64>,
}

impl Product {
    /// Build a product from required fields, enforcing the emission
    /// invariant. Returns `None` when any required field is invalid, so
    /// extraction loops can drop single candidates without aborting.
    pub fn build(
        id: impl Into<String>,
        name: &str,
        price: f64,
        source: &str,
        product_url: impl Into<String>,
    ) -> Option<Self> {
        let id = id.into();
        let name = name.trim();
        let product_url = product_url.into();
        if id.is_empty() || name.is_empty() || product_url.is_empty() {
            return None;
        }
        if !price.is_finite() || price <= 0.0 {
            return None;
        }
        Some(Self {
            id,
            name: name.to_string(),
            price,
            source: source.to_string(),
            product_url,
            rating: None,
            reviews: None,
        })
    }

    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating.filter(|r| r.is_finite());
        self
    }

    pub fn with_reviews(mut self, reviews: Option<u64>) -> Self {
        self.reviews = reviews;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_valid() {
        let p = Product::build("123", "  Coffee Maker  ", 49.99, "Walmart", "https://x/y").unwrap();
        assert_eq!(p.name, "Coffee Maker");
        assert_eq!(p.price, 49.99);
        assert_eq!(p.source, "Walmart");
        assert!(p.rating.is_none());
    }

    #[test]
    fn test_build_rejects_invalid_required_fields() {
        assert!(Product::build("", "name", 1.0, "W", "https://x").is_none());
        assert!(Product::build("1", "   ", 1.0, "W", "https://x").is_none());
        assert!(Product::build("1", "name", 0.0, "W", "https://x").is_none());
        assert!(Product::build("1", "name", -3.5, "W", "https://x").is_none());
        assert!(Product::build("1", "name", f64::NAN, "W", "https://x").is_none());
        assert!(Product::build("1", "name", 1.0, "W", "").is_none());
    }

    #[test]
    fn test_serializes_camel_case_url_and_skips_absent_optionals() {
        let p = Product::build("1", "name", 2.0, "W", "https://x").unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("productUrl").is_some());
        assert!(json.get("rating").is_none());
        assert!(json.get("reviews").is_none());

        let p = p.with_rating(Some(4.5)).with_reviews(Some(12));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["rating"], 4.5);
        assert_eq!(json["reviews"], 12);
    }
}
