//! Unwrapping of loosely-shaped API payloads.
//!
//! The API has been seen to answer the same resource as a bare array, as an
//! object keyed by the collection name, as `{"data": [...]}`, as a DynamoDB
//! style `{"Items": [...]}` and as an arbitrary single-key wrapper.

use serde_json::Value;

/// Locate the record list inside `payload`.
///
/// Tried in order: a bare array, the `collection` key, `data`, `Items`, and
/// finally the first array-valued key. Anything else yields an empty slice.
pub fn extract_list<'a>(payload: &'a Value, collection: &str) -> &'a [Value] {
    if let Some(items) = payload.as_array() {
        return items;
    }

    let Some(object) = payload.as_object() else {
        return &[];
    };

    [collection, "data", "Items"]
        .into_iter()
        .find_map(|key| object.get(key).and_then(Value::as_array))
        .or_else(|| object.values().find_map(Value::as_array))
        .map_or(&[], Vec::as_slice)
}

/// Unwrap a single record.
///
/// Handles a JSON-encoded `body` string (API Gateway proxy responses), then
/// `product` and `data` wrappers.
pub fn extract_record(payload: Value) -> Value {
    let payload = match payload.get("body").and_then(Value::as_str) {
        Some(body) => serde_json::from_str(body).unwrap_or(payload),
        None => payload,
    };

    match payload {
        Value::Object(mut object) => {
            if let Some(inner) = object.remove("product").filter(Value::is_object) {
                return inner;
            }

            if let Some(inner) = object.remove("data").filter(Value::is_object) {
                return inner;
            }

            Value::Object(object)
        }
        other => other,
    }
}
