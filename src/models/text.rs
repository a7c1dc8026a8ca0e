//! Parsing helpers for the messy text retailers put in price, rating,
//! and review-count fields.

/// Parse a price string like `"$1,299.00"` into a positive finite amount.
///
/// Currency symbols and grouping separators are stripped before parsing.
/// Returns `None` for anything non-numeric, non-positive, or non-finite;
/// absence of a price disqualifies the item rather than defaulting to zero.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let price: f64 = cleaned.parse().ok()?;
    (price.is_finite() && price > 0.0).then_some(price)
}

/// Parse a price split into whole and fractional sub-elements, e.g.
/// whole `"1,299"` and fraction `"00"` becoming `1299.00`.
pub fn parse_price_parts(whole: &str, fraction: &str) -> Option<f64> {
    let whole: String = whole.chars().filter(char::is_ascii_digit).collect();
    let fraction: String = fraction.chars().filter(char::is_ascii_digit).collect();
    if whole.is_empty() {
        return None;
    }
    if fraction.is_empty() {
        parse_price(&whole)
    } else {
        parse_price(&format!("{whole}.{fraction}"))
    }
}

/// Extract a leading numeric token from a descriptive string, e.g.
/// `"4.5 out of 5 stars"` → `4.5`.
pub fn parse_leading_f64(text: &str) -> Option<f64> {
    let token: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value: f64 = token.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Extract a leading integer with grouping separators stripped, e.g.
/// `"1,234 reviews"` → `1234`.
pub fn parse_grouped_u64(text: &str) -> Option<u64> {
    let token: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    token.parse().ok()
}
