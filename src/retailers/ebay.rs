//! eBay search-results adapter.
//!
//! Listings have no stable id attribute; identity comes from the numeric
//! item segment in the listing URL (`/itm/<id>`).

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{absolute_url, select_attr, select_text, Retailer, MAX_ITEMS};
use crate::error::ExtractError;
use crate::models::{parse_price, Product};

const ID: &str = "eBay";
const ORIGIN: &str = "https://www.ebay.com";
const CARDS: &str = "li.s-item";

pub fn retailer() -> Retailer {
    Retailer {
        id: ID,
        origin: ORIGIN,
        search_template: "https://www.ebay.com/sch/i.html?_nkw={query}",
        wait_selector: CARDS,
        adapter: extract,
    }
}

pub fn extract(doc: &Html) -> Result<Vec<Product>, ExtractError> {
    let cards = Selector::parse(CARDS).unwrap();
    let title = Selector::parse(".s-item__title").unwrap();
    let price = Selector::parse(".s-item__price").unwrap();
    let link = Selector::parse("a.s-item__link[href]").unwrap();

    let mut products = Vec::new();
    let mut card_count = 0usize;
    for card in doc.select(&cards).take(MAX_ITEMS) {
        card_count += 1;
        if let Some(product) = extract_card(&card, &title, &price, &link) {
            products.push(product);
        }
    }

    if card_count == 0 {
        return Err(ExtractError::StructuralMismatch {
            selector: CARDS.to_string(),
        });
    }
    Ok(products)
}

fn extract_card(
    card: &ElementRef<'_>,
    title: &Selector,
    price: &Selector,
    link: &Selector,
) -> Option<Product> {
    let name = select_text(card, title)?;
    let price = parse_price(&select_text(card, price)?)?;
    let href = select_attr(card, link, "href")?;
    let product_url = absolute_url(ORIGIN, &href)?;
    let id = listing_id(&product_url)?;
    Product::build(id, &name, price, ID, product_url)
}

/// Numeric listing id from an `/itm/<id>` URL path.
fn listing_id(product_url: &str) -> Option<String> {
    let url = Url::parse(product_url).ok()?;
    let mut segments = url.path_segments()?;
    segments.find(|s| *s == "itm")?;
    segments
        .next()
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, price: &str, href: &str) -> String {
        format!(
            r#"<li class="s-item">
                <a class="s-item__link" href="{href}">
                    <div class="s-item__title">{name}</div>
                </a>
                <span class="s-item__price">{price}</span>
            </li>"#
        )
    }

    #[test]
    fn test_extracts_listing() {
        let html = format!(
            "<html><body><ul>{}</ul></body></html>",
            card("Moka Pot", "$23.50", "https://www.ebay.com/itm/1234567890?hash=abc"),
        );
        let products = extract(&Html::parse_document(&html)).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "1234567890");
        assert_eq!(products[0].price, 23.5);
        assert_eq!(products[0].source, "eBay");
    }

    #[test]
    fn test_drops_listing_without_numeric_item_id() {
        let html = format!(
            "<html><body><ul>{}{}</ul></body></html>",
            card("Template row", "$1.00", "https://www.ebay.com/help/policies"),
            card("Real listing", "$5.00", "/itm/555"),
        );
        let products = extract(&Html::parse_document(&html)).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "555");
        assert_eq!(products[0].product_url, "https://www.ebay.com/itm/555");
    }

    #[test]
    fn test_price_range_is_dropped_not_guessed() {
        let html = format!(
            "<html><body><ul>{}</ul></body></html>",
            card("Assorted lot", "$20.00 to $35.00", "/itm/777"),
        );
        let products = extract(&Html::parse_document(&html)).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_zero_cards_is_structural_mismatch() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert!(matches!(
            extract(&doc),
            Err(ExtractError::StructuralMismatch { .. })
        ));
    }
}
