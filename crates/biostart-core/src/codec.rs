//! Nested-JSON codec.
//!
//! Two content types (quiz questions, checklist items) are persisted as a
//! single string field holding serialized JSON rather than native nested
//! structures. [`decode`] is the strict parse; [`decode_or_default`] is the
//! one tolerant boundary, where an absent, empty, or malformed stored string
//! degrades to the type's default with a logged diagnostic instead of
//! failing the request. Clients rely on list responses always being 200, so
//! the downgrade must stay.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::DecodeError;
use crate::{Error, Result};

/// Strictly decode a string-embedded JSON field.
///
/// Returns `Ok(None)` when the field is absent, `null`, or holds an empty
/// string; `Err` when the field is not a string or its content is not valid
/// JSON for `T`.
pub fn decode<T: DeserializeOwned>(
    field: &'static str,
    raw: Option<&Value>,
) -> std::result::Result<Option<T>, DecodeError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    let text = value.as_str().ok_or(DecodeError::NotAString { field })?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|source| DecodeError::Malformed { field, source })
}

/// Tolerantly decode a string-embedded JSON field.
///
/// Malformed stored data degrades to `T::default()` with a `warn!`
/// diagnostic. This is the only place a [`DecodeError`] is swallowed.
pub fn decode_or_default<T: DeserializeOwned + Default>(
    field: &'static str,
    record_id: &str,
    raw: Option<&Value>,
) -> T {
    match decode(field, raw) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            warn!(record_id, error = %err, "malformed nested JSON, substituting default");
            T::default()
        }
    }
}

/// Encode a nested structure into its string-embedded storage form.
///
/// Strict inverse of [`decode`]; used whenever a canonical-shape value is
/// about to be persisted under its raw field name.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::Validation(format!("payload cannot be serialized: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_absent_field_is_none() {
        let decoded: Option<Vec<String>> = decode("items", None).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn decode_empty_string_is_none() {
        let raw = json!("");
        let decoded: Option<Vec<String>> = decode("items", Some(&raw)).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn decode_null_is_none() {
        let raw = Value::Null;
        let decoded: Option<Vec<String>> = decode("items", Some(&raw)).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn decode_non_string_fails() {
        let raw = json!(["already", "an", "array"]);
        let err = decode::<Vec<String>>("items", Some(&raw)).unwrap_err();
        assert!(matches!(err, DecodeError::NotAString { field: "items" }));
    }

    #[test]
    fn decode_malformed_json_fails() {
        let raw = json!("[not json");
        let err = decode::<Vec<String>>("items", Some(&raw)).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn decode_or_default_never_fails() {
        for raw in [json!("{broken"), json!(12), json!(""), Value::Null] {
            let decoded: Vec<String> = decode_or_default("items", "rec1", Some(&raw));
            assert!(decoded.is_empty());
        }
    }

    #[test]
    fn encode_decode_round_trip() {
        let items = vec!["a".to_string(), "b".to_string()];
        let encoded = encode(&items).unwrap();
        let raw = Value::String(encoded);
        let decoded: Vec<String> = decode("items", Some(&raw)).unwrap().unwrap();
        assert_eq!(decoded, items);
    }
}
