//! Typed lookups over flat storage rows.

use crate::domain::{DomainError, DomainResult};
use serde_json::{Map, Value};

/// Expected type of a stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Integer,
    String,
}

/// Fetch `key` from `attributes`, checking presence, nullability and type.
///
/// Returns `Ok(None)` only when the value is null and `nullable` is set.
///
/// # Errors
///
/// `DomainError::Validation` if the key is missing, the value is null and
/// not nullable, or the value has the wrong type.
pub fn get_attribute<'a>(
    attributes: &'a Map<String, Value>,
    key: &str,
    kind: AttributeKind,
    nullable: bool,
) -> DomainResult<Option<&'a Value>> {
    let value = attributes.get(key).ok_or_else(|| {
        DomainError::validation(format!("Missing required '{}' attribute.", key))
    })?;

    if value.is_null() {
        if nullable {
            return Ok(None);
        }
        return Err(DomainError::validation(format!(
            "The attribute '{}' cannot be null.",
            key
        )));
    }

    match kind {
        AttributeKind::Integer if !value.is_i64() => Err(DomainError::validation(format!(
            "The value of '{}' attribute must be an integer.",
            key
        ))),
        AttributeKind::String if !value.is_string() => Err(DomainError::validation(format!(
            "The value of '{}' attribute must be a string.",
            key
        ))),
        _ => Ok(Some(value)),
    }
}

/// Required string attribute.
pub fn string_attribute<'a>(attributes: &'a Map<String, Value>, key: &str) -> DomainResult<&'a str> {
    let value = get_attribute(attributes, key, AttributeKind::String, false)?;
    Ok(value.and_then(Value::as_str).unwrap_or_default())
}

/// Nullable string attribute.
pub fn optional_string_attribute<'a>(
    attributes: &'a Map<String, Value>,
    key: &str,
) -> DomainResult<Option<&'a str>> {
    let value = get_attribute(attributes, key, AttributeKind::String, true)?;
    Ok(value.and_then(Value::as_str))
}

/// Required integer attribute.
pub fn integer_attribute(attributes: &Map<String, Value>, key: &str) -> DomainResult<i64> {
    let value = get_attribute(attributes, key, AttributeKind::Integer, false)?;
    Ok(value.and_then(Value::as_i64).unwrap_or_default())
}
