//! Amazon search-results adapter.
//!
//! Prices are split across whole and fraction sub-elements and must be
//! recombined before parsing. Rating text reads like "4.5 out of 5
//! stars"; review counts carry grouping separators.

use scraper::{ElementRef, Html, Selector};

use super::{absolute_url, select_attr, select_text, Retailer, MAX_ITEMS};
use crate::error::ExtractError;
use crate::models::{parse_grouped_u64, parse_leading_f64, parse_price_parts, Product};

const ID: &str = "Amazon";
const ORIGIN: &str = "https://www.amazon.com";
const CARDS: &str = r#"div[data-component-type="s-search-result"]"#;

pub fn retailer() -> Retailer {
    Retailer {
        id: ID,
        origin: ORIGIN,
        search_template: "https://www.amazon.com/s?k={query}",
        wait_selector: CARDS,
        adapter: extract,
    }
}

pub fn extract(doc: &Html) -> Result<Vec<Product>, ExtractError> {
    let cards = Selector::parse(CARDS).unwrap();
    let title = Selector::parse("h2 span").unwrap();
    let price_whole = Selector::parse(".a-price-whole").unwrap();
    let price_fraction = Selector::parse(".a-price-fraction").unwrap();
    let link = Selector::parse("a.a-link-normal[href]").unwrap();
    let rating = Selector::parse(".a-icon-alt").unwrap();
    let reviews = Selector::parse("span[aria-label] .s-underline-text, .s-link-style span").unwrap();

    let mut products = Vec::new();
    let mut card_count = 0usize;
    for card in doc.select(&cards).take(MAX_ITEMS) {
        card_count += 1;
        let Some(product) = extract_card(&card, &title, &price_whole, &price_fraction, &link)
        else {
            continue;
        };
        let product = product
            .with_rating(select_text(&card, &rating).as_deref().and_then(parse_leading_f64))
            .with_reviews(select_text(&card, &reviews).as_deref().and_then(parse_grouped_u64));
        products.push(product);
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
    price_whole: &Selector,
    price_fraction: &Selector,
    link: &Selector,
) -> Option<Product> {
    // data-asin is present but empty on sponsored filler rows.
    let id = card.value().attr("data-asin").filter(|s| !s.is_empty())?;
    let name = select_text(card, title)?;
    let whole = select_text(card, price_whole)?;
    let fraction = select_text(card, price_fraction).unwrap_or_default();
    let price = parse_price_parts(&whole, &fraction)?;
    let href = select_attr(card, link, "href")?;
    let product_url = absolute_url(ORIGIN, &href)?;
    Product::build(id, &name, price, ID, product_url)
}
