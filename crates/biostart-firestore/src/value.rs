//! Firestore typed-value mapping.
//!
//! Firestore documents carry typed values (`{"stringValue": "x"}`); raw
//! fields in the rest of the backend are plain JSON. This module converts
//! between the two.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A Firestore `Value`, externally tagged by type.
///
/// Only the types this backend writes (and their read-side counterparts)
/// are modeled; bytes, references and geo points never occur in content
/// records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum FirestoreValue {
    NullValue(()),
    BooleanValue(bool),
    /// int64, carried as a decimal string on the wire.
    IntegerValue(String),
    DoubleValue(f64),
    StringValue(String),
    TimestampValue(String),
    ArrayValue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        values: Option<Vec<FirestoreValue>>,
    },
    MapValue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<BTreeMap<String, FirestoreValue>>,
    },
}

/// Convert a plain JSON value to its Firestore typed form.
pub(crate) fn to_firestore(value: &Value) -> FirestoreValue {
    match value {
        Value::Null => FirestoreValue::NullValue(()),
        Value::Bool(b) => FirestoreValue::BooleanValue(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FirestoreValue::IntegerValue(i.to_string())
            } else {
                FirestoreValue::DoubleValue(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => FirestoreValue::StringValue(s.clone()),
        Value::Array(items) => FirestoreValue::ArrayValue {
            values: Some(items.iter().map(to_firestore).collect()),
        },
        Value::Object(map) => FirestoreValue::MapValue {
            fields: Some(
                map.iter()
                    .map(|(k, v)| (k.clone(), to_firestore(v)))
                    .collect(),
            ),
        },
    }
}

/// Convert a Firestore typed value back to plain JSON.
pub(crate) fn to_json(value: FirestoreValue) -> Value {
    match value {
        FirestoreValue::NullValue(()) => Value::Null,
        FirestoreValue::BooleanValue(b) => Value::Bool(b),
        FirestoreValue::IntegerValue(s) => match s.parse::<i64>() {
            Ok(i) => Value::Number(i.into()),
            // Out-of-range int64s survive as strings rather than lose data.
            Err(_) => Value::String(s),
        },
        FirestoreValue::DoubleValue(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        FirestoreValue::StringValue(s) => Value::String(s),
        FirestoreValue::TimestampValue(s) => Value::String(s),
        FirestoreValue::ArrayValue { values } => Value::Array(
            values
                .unwrap_or_default()
                .into_iter()
                .map(to_json)
                .collect(),
        ),
        FirestoreValue::MapValue { fields } => Value::Object(
            fields
                .unwrap_or_default()
                .into_iter()
                .map(|(k, v)| (k, to_json(v)))
                .collect(),
        ),
    }
}
