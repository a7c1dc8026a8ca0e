//! Walmart search-results adapter.
//!
//! Item cards are marked with a `data-item-id` attribute; title and price
//! live in `data-automation-id` annotated children.

use scraper::{ElementRef, Html, Selector};

use super::{absolute_url, select_attr, select_text, Retailer, MAX_ITEMS};
use crate::error::ExtractError;
use crate::models::{parse_price, Product};

const ID: &str = "Walmart";
const ORIGIN: &str = "https://www.walmart.com";
const CARDS: &str = "[data-item-id]";

pub fn retailer() -> Retailer {
    Retailer {
        id: ID,
        origin: ORIGIN,
        search_template: "https://www.walmart.com/search?q={query}",
        wait_selector: CARDS,
        adapter: extract,
    }
}

pub fn extract(doc: &Html) -> Result<Vec<Product>, ExtractError> {
    let cards = Selector::parse(CARDS).unwrap();
    let title = Selector::parse(r#"span[data-automation-id="product-title"]"#).unwrap();
    let price = Selector::parse(r#"[data-automation-id="product-price"] .f2"#).unwrap();
    let link = Selector::parse("a[href]").unwrap();

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
    let id = card.value().attr("data-item-id")?;
    let name = select_text(card, title)?;
    let price = parse_price(&select_text(card, price)?)?;
    let href = select_attr(card, link, "href")?;
    let product_url = absolute_url(ORIGIN, &href)?;
    Product::build(id, &name, price, ID, product_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, name: &str, price: &str, href: &str) -> String {
        format!(
            r#"<div data-item-id="{id}">
                <a href="{href}">
                    <span data-automation-id="product-title">{name}</span>
                </a>
                <div data-automation-id="product-price"><span class="f2">{price}</span></div>
            </div>"#
        )
    }

    #[test]
    fn test_extracts_well_formed_cards_in_page_order() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            card("100", "Drip Coffee Maker", "$49.99", "/ip/drip/100"),
            card("200", "Espresso Machine", "$1,299.00", "/ip/espresso/200"),
        );
        let doc = Html::parse_document(&html);
        let products = extract(&doc).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "100");
        assert_eq!(products[0].name, "Drip Coffee Maker");
        assert_eq!(products[0].price, 49.99);
        assert_eq!(products[0].source, "Walmart");
        assert_eq!(products[0].product_url, "https://www.walmart.com/ip/drip/100");
        assert_eq!(products[1].price, 1299.0);
    }

    #[test]
    fn test_caps_at_ten_items() {
        let cards: String = (0..12)
            .map(|i| card(&i.to_string(), "Widget", "$5.00", "/ip/w"))
            .collect();
        let doc = Html::parse_document(&format!("<html><body>{cards}</body></html>"));
        let products = extract(&doc).unwrap();
        assert_eq!(products.len(), 10);
        assert_eq!(products[9].id, "9");
    }

    #[test]
    fn test_drops_card_missing_required_field() {
        let broken = r#"<div data-item-id="300"><a href="/ip/x">
            <span data-automation-id="product-title">No price here</span></a></div>"#;
        let html = format!(
            "<html><body>{}{}</body></html>",
            broken,
            card("400", "Kettle", "$19.99", "/ip/kettle/400"),
        );
        let doc = Html::parse_document(&html);
        let products = extract(&doc).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "400");
    }

    #[test]
    fn test_zero_cards_is_structural_mismatch() {
        let doc = Html::parse_document("<html><body><p>Robot check</p></body></html>");
        let err = extract(&doc).unwrap_err();
        assert!(matches!(err, ExtractError::StructuralMismatch { .. }));
    }
}
