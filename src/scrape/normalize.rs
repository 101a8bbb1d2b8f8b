//! Normalization of free-form price and rating text to numeric values.
//!
//! Both functions are total: they never panic and always return a finite
//! number, falling back to `0.0` for anything unparseable. That fallback is
//! part of the contract; a malformed numeric field must degrade, not reject
//! the listing it belongs to.

use regex::Regex;
use std::sync::OnceLock;

fn numeral_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+\.\d+|\d+").expect("static pattern"))
}

/// Convert price text such as `"€ 1,234.56"` to a float.
///
/// Strips every character that is not an ASCII digit or a decimal point
/// before parsing, so currency symbols, thousands separators, and embedded
/// whitespace all disappear. A price-range string therefore collapses into
/// one concatenated numeral; see DESIGN.md for why that behavior is kept.
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Convert rating text such as `"8.3 Good"` to a float.
///
/// Takes the first integer or decimal numeral found anywhere in the text.
pub fn parse_rating(text: &str) -> f64 {
    numeral_pattern()
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
