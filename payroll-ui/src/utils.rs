use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Longest numeric prefix accepted by [`parse_number`].
fn numeric_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("numeric prefix pattern is valid")
    })
}

/// Parses a form field into a number, leniently.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12abc"` reads as `12` and `"1e3"` as `1000`. `"Infinity"` with an
/// optional sign is accepted. Anything else, including an empty field,
/// yields `NaN`; callers must not assume the result is finite.
pub fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim_start();
    let Some(m) = numeric_prefix().find(trimmed) else {
        tracing::debug!(input = %s, "non-numeric input, using NaN");
        return f64::NAN;
    };

    let text = m.as_str();
    match text.trim_start_matches(['+', '-']) {
        "Infinity" if text.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => text.parse().unwrap_or_else(|e| {
            tracing::warn!(input = %s, "numeric prefix did not parse: {}", e);
            f64::NAN
        }),
    }
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders a non-finite value the way a number would print it.
fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

/// Formats an amount with exactly two decimals, no grouping.
fn fixed_two(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(d) => format!("{:.2}", round_half_up(d)),
        // Beyond Decimal's range; f64 formatting is close enough there.
        None => format!("{value:.2}"),
    }
}

/// Inserts thousands separators into the integer part of a fixed-point string.
fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Formats a table cell amount, e.g. `₱1000.00`.
pub fn format_money(
    value: f64,
    symbol: &str,
) -> String {
    match non_finite(value) {
        Some(text) => format!("{symbol}{text}"),
        None => format!("{symbol}{}", fixed_two(value)),
    }
}

/// Formats a summary total with thousands grouping, e.g. `₱1,300.00`.
pub fn format_total(
    value: f64,
    symbol: &str,
) -> String {
    match non_finite(value) {
        Some(text) => format!("{symbol}{text}"),
        None => format!("{symbol}{}", group_thousands(&fixed_two(value))),
    }
}

/// Formats a raw input number (hours, rate) without forcing decimals.
pub fn format_plain(value: f64) -> String {
    match non_finite(value) {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}

/// Formats a value derived by float division to ten significant digits,
/// so `7.000000000000001` prints as `7`.
pub fn format_recovered(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return text.to_string();
    }
    Decimal::from_f64(value)
        .and_then(|d| d.round_sf(10))
        .map_or_else(|| value.to_string(), |d| d.normalize().to_string())
}
