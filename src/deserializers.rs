//! Forgiving deserializers for brand-profile fields.
//!
//! Brand records come out of the application database with list and map
//! columns stored either as native JSON values or as JSON-encoded strings.
//! Everything that crosses the `BrandProfile` boundary goes through the helpers
//! here so the rest of the crate only ever sees typed values.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Decode a value that is either a JSON array or a string holding one.
///
/// # Accepted Formats
///
/// * **Native array**: `["cheap", "low-cost"]`
/// * **Encoded array**: `"[\"cheap\", \"low-cost\"]"`
/// * **Absent**: `null` or `""` → empty
///
/// Anything else (a non-array string, a number, elements of the wrong shape)
/// yields an empty list and a warning; a bad column never fails the request.
pub fn parse_maybe_json_array<T: DeserializeOwned>(value: &Value) -> Vec<T> {
    let decoded = match value {
        Value::Null => return Vec::new(),
        Value::String(s) if s.trim().is_empty() => return Vec::new(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(inner) => inner,
            Err(e) => {
                tracing::warn!("Ignoring brand field that is not a JSON array: {}", e);
                return Vec::new();
            }
        },
        other => other.clone(),
    };
    match decoded {
        Value::Array(_) => serde_json::from_value(decoded).unwrap_or_else(|e| {
            tracing::warn!("Ignoring brand array with unexpected element shape: {}", e);
            Vec::new()
        }),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!("Expected a JSON array for brand field, got {}", type_name(&other));
            Vec::new()
        }
    }
}

/// Map counterpart of [`parse_maybe_json_array`] for fields such as `toneAttributes`.
pub fn parse_maybe_json_map(value: &Value) -> Map<String, Value> {
    let decoded = match value {
        Value::Null => return Map::new(),
        Value::String(s) if s.trim().is_empty() => return Map::new(),
        Value::String(s) => serde_json::from_str::<Value>(s).unwrap_or(Value::Null),
        other => other.clone(),
    };
    match decoded {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            tracing::warn!("Expected a JSON object for brand field, got {}", type_name(&other));
            Map::new()
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// serde adapter: `#[serde(default, deserialize_with = "de_maybe_json_array")]`
pub fn de_maybe_json_array<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_maybe_json_array(&value))
}

/// serde adapter: `#[serde(default, deserialize_with = "de_maybe_json_map")]`
pub fn de_maybe_json_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_maybe_json_map(&value))
}
