//! Data models for normalized product results.

mod product;
mod text;

pub use product::Product;
pub use text::{parse_grouped_u64, parse_leading_f64, parse_price, parse_price_parts};
