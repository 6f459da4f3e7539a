//! Utility functions and helpers

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::new();
    let mut count = 0;
    for c in int_part.chars().rev() {
        if count == 3 {
            grouped.push(',');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let mut result: String = sign.to_string();
    result.extend(grouped.chars().rev());
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }
    result
}

/// Round half-to-even to `dp` decimal places. `None` for NaN or infinite input.
pub fn round_half_even(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven).normalize())
}

/// Display a value rounded to `dp` places, with thousands separators
pub fn format_rounded(value: f64, dp: u32) -> String {
    match round_half_even(value, dp) {
        Some(d) => format_number(d),
        None => "-".to_string(),
    }
}

/// Display a price in whole dollars
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = format_rounded(value, 0);
    match rounded.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", rounded),
    }
}

/// Escape text for interpolation into HTML content and attribute values
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
