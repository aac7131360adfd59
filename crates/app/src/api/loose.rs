//! Field accessors for records whose keys vary between API versions.
//!
//! Each accessor takes a list of aliases and returns the first one holding a
//! usable value. Empty strings, zeros, `false` and `null` fall through to the
//! next alias.

use std::str::FromStr as _;

use rust_decimal::Decimal;
use serde_json::Value;

fn first<'a>(record: &'a Value, aliases: &[&str]) -> impl Iterator<Item = &'a Value> {
    aliases.iter().filter_map(move |alias| record.get(*alias))
}

/// First non-empty string (or number, rendered as text).
pub fn text(record: &Value, aliases: &[&str]) -> Option<String> {
    first(record, aliases).find_map(|value| match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) if as_decimal(value).is_some_and(|value| !value.is_zero()) => {
            Some(number.to_string())
        }
        _ => None,
    })
}

/// First non-zero decimal, accepting numeric strings. Defaults to zero.
pub fn decimal(record: &Value, aliases: &[&str]) -> Decimal {
    first(record, aliases)
        .filter_map(as_decimal)
        .find(|value| !value.is_zero())
        .unwrap_or_default()
}

/// First non-zero integer, accepting numeric strings. Defaults to zero.
pub fn integer(record: &Value, aliases: &[&str]) -> i64 {
    first(record, aliases)
        .filter_map(|value| match value {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        })
        .find(|value| *value != 0)
        .unwrap_or_default()
}

/// Boolean that only reads as `false` when explicitly set to `false`.
pub fn flag_unless_false(record: &Value, key: &str) -> bool {
    record.get(key).and_then(Value::as_bool) != Some(false)
}

/// String items of an array field, skipping anything else.
pub fn strings(record: &Value, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(Decimal::from)
            .or_else(|| number.as_f64().and_then(|float| Decimal::try_from(float).ok())),
        Value::String(text) => Decimal::from_str(text.trim()).ok(),
        _ => None,
    }
}
