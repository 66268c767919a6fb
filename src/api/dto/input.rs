//! Normalization of raw request values, applied while deserializing.
//!
//! String inputs are trimmed before any rule sees them. On creation a blank
//! value counts as absent; on update it stays present so the "must have a
//! value" rule can reject it.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Trims the value; blank strings become `None`.
pub fn trimmed_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Trims the value, keeping blank strings as `Some("")`.
pub fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

/// Keeps any JSON value except `null` and blank strings, which become `None`.
pub fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(other),
    })
}
