//! Raw record types shared by the backing stores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a stored record, assigned by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a record id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A sparse set of raw storage fields.
///
/// Keys are store-specific field names; values are plain JSON. Only fields
/// present in the set are touched by a write, so an absent field and an
/// explicit `null` value mean different things.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(Map<String, Value>);

impl RawFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert a field value, replacing any previous value for that name.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// True when the set holds no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the fields.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume and return the underlying JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A raw record from a backing store: an opaque id plus opaque fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Store-assigned record id.
    pub id: RecordId,
    /// The record's fields, unmapped.
    pub fields: RawFields,
}

impl RawRecord {
    /// Create a raw record.
    pub fn new(id: impl Into<RecordId>, fields: RawFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Get a field value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a field value as a string slice, if it is a string.
    pub fn string_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_fields_sparse_insert() {
        let mut fields = RawFields::new();
        assert!(fields.is_empty());
        fields.insert("titulo", "Biogás");
        fields.insert("imageUrl", Value::Null);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("titulo"), Some(&json!("Biogás")));
        assert_eq!(fields.get("imageUrl"), Some(&Value::Null));
        assert_eq!(fields.get("conteudo"), None);
    }

    #[test]
    fn raw_fields_serializes_transparently() {
        let mut fields = RawFields::new();
        fields.insert("titulo", "T");
        let serialized = serde_json::to_value(&fields).unwrap();
        assert_eq!(serialized, json!({"titulo": "T"}));
    }

    #[test]
    fn string_field_rejects_non_strings() {
        let mut fields = RawFields::new();
        fields.insert("Idade", 42);
        let record = RawRecord::new("rec1", fields);
        assert_eq!(record.string_field("Idade"), None);
        assert_eq!(record.field("Idade"), Some(&json!(42)));
    }
}
