//! Tolerant parsing of display-formatted monetary values.
//!
//! Portal values arrive in several shapes: plain decimals
//! (`"500000000.00"`), locale-formatted strings with currency symbol and
//! thousands separators (`"$ 1.234.567,89"`), and signed values with
//! internal spacing (`"- 500"`). Anything unparseable coerces to zero;
//! a bad row must never abort a batch.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Parses a display-formatted monetary string into a [`Decimal`].
///
/// Strips currency symbols and whitespace, accepts both `1.234.567,89`
/// and `1,234,567.89` separator conventions, and returns zero on any
/// value it cannot make sense of.
pub fn parse_money(raw: &str) -> Decimal {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$')
        .collect();
    if compact.is_empty() {
        return Decimal::ZERO;
    }

    let (negative, digits) = match compact.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };

    let normalized = normalize_separators(digits);
    let value = Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO);
    if negative {
        -value
    } else {
        value
    }
}

/// Parses a raw JSON value (string or number) into a [`Decimal`].
pub fn parse_money_value(value: &Value) -> Decimal {
    match value {
        Value::String(s) => parse_money(s),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Rewrites locale separators into a canonical `1234567.89` form.
///
/// When both separators appear, the rightmost one is the decimal mark.
/// A lone comma with at most two trailing digits reads as the decimal
/// mark; repeated dots without a comma read as thousands grouping.
fn normalize_separators(s: &str) -> String {
    match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) => {
            if dot > comma {
                s.replace(',', "")
            } else {
                s.replace('.', "").replace(',', ".")
            }
        }
        (None, Some(comma)) => {
            let fraction_digits = s.len() - comma - 1;
            if s.matches(',').count() == 1 && fraction_digits <= 2 {
                s.replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        (Some(_), None) => {
            if s.matches('.').count() > 1 {
                s.replace('.', "")
            } else {
                s.to_string()
            }
        }
        (None, None) => s.to_string(),
    }
}
