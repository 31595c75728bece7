//! Lenient field decoding for documents written by other systems.
//!
//! Booking and notification documents are produced by mobile clients and
//! admin tooling that do not agree on field types. A field that cannot be
//! read as a string is treated as absent so that callers fall back to their
//! defaults instead of rejecting the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional string field, coercing scalars and dropping the rest.
///
/// - Non-empty strings are kept as-is.
/// - Non-zero numbers and `true` are rendered with their JSON text form.
/// - Empty strings, `0`, `false`, `null`, arrays and objects become `None`,
///   matching how the writing clients test a field for presence.
///
/// Use together with `#[serde(default)]` so a missing field is also `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(coerce))
}

fn coerce(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
