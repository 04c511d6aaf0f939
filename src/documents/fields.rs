//! Field coercion helpers for untyped documents.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

pub(crate) type Fields = Map<String, Value>;

/// Largest magnitude accepted for a numeric field. Anything beyond is treated as malformed.
pub(crate) const MAX_MAGNITUDE: i64 = 1_000_000_000_000_000;

/// Coerce a JSON value into a decimal. Numbers and numeric strings are accepted as long as
/// they stay within [`MAX_MAGNITUDE`].
pub(crate) fn to_decimal(value: &Value) -> Option<Decimal> {
    let parsed = match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(&text.trim().replace(',', "")),
        _ => None,
    };

    parsed
        .filter(|decimal| decimal.abs() <= Decimal::new(MAX_MAGNITUDE, 0))
        .map(|decimal| decimal.normalize())
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_err| Decimal::from_scientific(text))
        .ok()
}

/// Decimal field; missing or non-numeric values become zero.
pub(crate) fn decimal(fields: &Fields, key: &str) -> Decimal {
    optional_decimal(fields, key).unwrap_or(Decimal::ZERO)
}

/// Decimal field read from the first key present with a numeric value.
pub(crate) fn first_decimal(fields: &Fields, keys: &[&str]) -> Decimal {
    keys.iter()
        .find_map(|key| optional_decimal(fields, key))
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn optional_decimal(fields: &Fields, key: &str) -> Option<Decimal> {
    fields.get(key).and_then(to_decimal)
}

/// Whole number field. Floats without a fractional part are accepted.
pub(crate) fn integer(fields: &Fields, key: &str) -> Option<i64> {
    let value = fields.get(key)?;

    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            to_decimal(value)
                .filter(|decimal| decimal.fract().is_zero())
                .and_then(|decimal| i64::try_from(decimal).ok())
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Floating point field used for ordering; missing or non-numeric values become zero.
pub(crate) fn ordinal(fields: &Fields, key: &str) -> f64 {
    let value = match fields.get(key) {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    value.filter(|value| value.is_finite()).unwrap_or(0.0)
}

/// Text field; numbers are stringified, anything else becomes empty.
pub(crate) fn text(fields: &Fields, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Text field kept exactly as stored, for values that are matched verbatim.
pub(crate) fn verbatim_text(fields: &Fields, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

/// Text read from the first key with a non-empty value.
pub(crate) fn first_text(fields: &Fields, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text(fields, key))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Text field that is absent when empty.
pub(crate) fn optional_text(fields: &Fields, key: &str) -> Option<String> {
    Some(text(fields, key)).filter(|value| !value.is_empty())
}

/// Boolean field. Accepts `true`/`false` and their string forms; defaults to false.
pub(crate) fn flag(fields: &Fields, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Array field; anything that is not an array reads as empty.
pub(crate) fn list<'a>(fields: &'a Fields, key: &str) -> &'a [Value] {
    match fields.get(key) {
        Some(Value::Array(values)) => values,
        _ => &[],
    }
}

/// String entries of an array field, trimmed, with empties dropped.
pub(crate) fn strings(fields: &Fields, key: &str) -> Vec<String> {
    list(fields, key)
        .iter()
        .filter_map(|value| match value {
            Value::String(text) => Some(text.trim().to_string()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .filter(|value| !value.is_empty())
        .collect()
}
