use crate::error::QaError;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// Signed decimal numbers as printed in the reports: `-0.3`, `+1.5`, `.25`,
/// `12`, `1,024.5`, `2e-3`.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?\.?\d+(?:,\d{3})*\.?\d*(?:[eE][-+]?\d+)?").expect("valid number regex")
});

/// Parse a measurement value into an exact decimal.
///
/// Handles formats like:
/// - "68" -> 68
/// - "-0.030" -> -0.030
/// - "+1.5" -> 1.5
/// - " 2.0 " -> 2.0
pub fn parse_number(field: &str, s: &str) -> Result<Decimal, QaError> {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    Decimal::from_str(unsigned)
        .or_else(|_| Decimal::from_scientific(unsigned))
        .map_err(|_| QaError::NumericCoercion {
            field: field.to_string(),
            value: s.to_string(),
        })
}

/// Parse a percentage, ignoring the `%` sign: "98.5 %" -> 98.5.
pub fn parse_percent(field: &str, s: &str) -> Result<Decimal, QaError> {
    parse_number(field, &s.replace('%', ""))
}

/// Arithmetic mean, rounded to four decimals and printed without trailing
/// zeros. `None` for an empty input.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().copied().sum();
    Some((sum / Decimal::from(values.len())).round_dp(4).normalize())
}

/// Distinct values in first-seen order, joined with `sep`.
pub fn distinct_joined<'a, I>(values: I, sep: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen.join(sep)
}

/// Every number embedded in a line of text, in order of appearance.
pub fn extract_numbers(s: &str) -> Vec<&str> {
    NUMBER_RE.find_iter(s).map(|m| m.as_str()).collect()
}
