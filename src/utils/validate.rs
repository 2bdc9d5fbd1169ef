//! Permissive field extraction for JSON payloads and query strings.
//!
//! Request fields are type-checked leniently: a field of the wrong JSON
//! type is treated as absent instead of failing deserialization, and the
//! `validator` rules on the DTO then decide whether that is acceptable.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Deserialize a JSON payload object into `T` and run its validation rules.
pub fn from_payload<T>(payload: &Map<String, Value>) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_value(Value::Object(payload.clone()))
        .map_err(|e| AppError::validation("Missing required fields", vec![e.to_string()]))?;
    value.validate()?;
    Ok(value)
}

/// Same as [`from_payload`] for query-string parameters.
pub fn from_query<T>(query: &HashMap<String, String>) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let payload: Map<String, Value> = query
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    from_payload(&payload)
}

/// A JSON string, trimmed. Any other JSON type yields `None`.
pub fn trimmed_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s.trim().to_string()),
        _ => None,
    })
}

/// A JSON string that is non-empty after trimming. Anything else yields `None`.
pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(trimmed_string(deserializer)?.filter(|s| !s.is_empty()))
}

/// `true` only for the JSON literal `true`; strings like `"true"` do not count.
pub fn strictly_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

pub fn must_be_true(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_true"))
    }
}
