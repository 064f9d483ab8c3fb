//! Utility functions and helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Insert a separator between every group of three digits.
///
/// Expects a plain run of digits, optionally prefixed with `-`.
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}

/// Format a decimal with a fixed number of places and locale separators
///
/// Midpoints round away from zero, so `0.005` at two places is `0.01`.
pub fn format_decimal(value: Decimal, places: u32, thousands_sep: &str, decimal_sep: &str) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", places as usize, rounded);

    match plain.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}{}{}", group_thousands(int_part, thousands_sep), decimal_sep, frac_part)
        }
        None => group_thousands(&plain, thousands_sep),
    }
}

/// Escape text for safe inclusion in HTML element content and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
