//! Response envelope unwrapping.
//!
//! The backend is inconsistent: the same resource may come back bare, as
//! `{ success, data }`, or under a resource-named field. Every decoder looks
//! for the named field first, then `data`, then uses the raw body.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Select the payload inside an envelope.
pub fn unwrap_field(body: Value, field: &str) -> Value {
    match body {
        Value::Object(mut map) => {
            if let Some(inner) = map.remove(field).filter(|v| !v.is_null()) {
                return inner;
            }
            if let Some(inner) = map.remove("data").filter(|v| !v.is_null()) {
                return inner;
            }
            Value::Object(map)
        }
        other => other,
    }
}

/// Decode a single record from an envelope.
pub fn unwrap_one<T: DeserializeOwned>(body: Value, field: &str) -> Result<T, ApiError> {
    serde_json::from_value(unwrap_field(body, field))
        .map_err(|e| ApiError::Decode(format!("{}: {}", field, e)))
}

/// Decode a list from an envelope.
///
/// Anything other than an array after unwrapping is logged and treated as
/// an empty list, so list screens render "no items" instead of failing.
pub fn unwrap_list<T: DeserializeOwned>(body: Value, field: &str) -> Result<Vec<T>, ApiError> {
    match unwrap_field(body, field) {
        Value::Array(items) => serde_json::from_value(Value::Array(items))
            .map_err(|e| ApiError::Decode(format!("{}: {}", field, e))),
        other => {
            log::error!("Unexpected {} response format: {}", field, other);
            Ok(Vec::new())
        }
    }
}
