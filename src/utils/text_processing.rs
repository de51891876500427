//! Text processing utilities.
//!
//! This module contains helpers for normalizing item names, formatting
//! amounts for display, and filtering numeric keyboard input.

use regex::Regex;
use std::sync::OnceLock;

/// Lowercase the text and capitalize the first letter of every
/// space-separated word.
///
pub fn capitalized_first(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Format an amount without decimals when it is whole, otherwise with two.
///
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d*(\.\d{0,2})?$").expect("valid amount pattern"))
}

fn count_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d*$").expect("valid count pattern"))
}

/// Whether `text` is an acceptable partial amount (digits, one point, up to
/// two decimals).
///
pub fn is_amount_input(text: &str) -> bool {
    amount_pattern().is_match(text)
}

/// Whether `text` is an acceptable partial count (digits only).
///
pub fn is_count_input(text: &str) -> bool {
    count_pattern().is_match(text)
}

/// Parse an amount field; an empty field reads as zero.
///
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text == "." {
        return Some(0.0);
    }
    if !is_amount_input(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a count field; an empty field reads as zero.
///
pub fn parse_count(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    if !is_count_input(text) {
        return None;
    }
    text.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalized_first() {
        assert_eq!(capitalized_first("iced TEA"), "Iced Tea");
        assert_eq!(capitalized_first("Iced Tea"), "Iced Tea");
        assert_eq!(capitalized_first(""), "");
    }

    #[test]
    fn test_capitalized_first_keeps_spacing() {
        assert_eq!(capitalized_first("hot  choco "), "Hot  Choco ");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(15.0), "15");
        assert_eq!(format_amount(15.5), "15.50");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_amount_input() {
        assert!(is_amount_input(""));
        assert!(is_amount_input("12"));
        assert!(is_amount_input("12."));
        assert!(is_amount_input("12.25"));
        assert!(!is_amount_input("12.255"));
        assert!(!is_amount_input("1.2.3"));
        assert!(!is_amount_input("-3"));
        assert!(!is_amount_input("abc"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(""), Some(0.0));
        assert_eq!(parse_amount("."), Some(0.0));
        assert_eq!(parse_amount("12."), Some(12.0));
        assert_eq!(parse_amount("9.5"), Some(9.5));
        assert_eq!(parse_amount("x"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(""), Some(0));
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count("4.2"), None);
        assert_eq!(parse_count("-1"), None);
    }
}
