//! Field values and the ordered field map.
//!
//! A sync pass computes one [`FieldValueMap`] per record: logical field name
//! to value, in correspondence-table order. The map is computed fresh every
//! pass, mutated in place by the redaction filter and the hook fold, and
//! discarded after reconciliation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// A single field value on a CMS record.
///
/// Equality on this type is the field-type-aware comparison used for
/// change detection: a write happens only when the computed value differs
/// from the stored one under this equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value.
    #[default]
    Null,
    /// A single text value.
    Text(String),
    /// A list of text values.
    List(Vec<String>),
    /// An ordered list of record references. A `None` entry is an
    /// unresolved reference holding its source-list position.
    References(Vec<Option<RecordId>>),
}

impl FieldValue {
    /// Check if this is the null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Get as text if this is a single text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a list if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get as references if this is a reference list.
    #[must_use]
    pub fn as_references(&self) -> Option<&[Option<RecordId>]> {
        match self {
            FieldValue::References(refs) => Some(refs),
            _ => None,
        }
    }

    /// Create a text value from an optional string, mapping `None` to null.
    pub fn from_optional_text(value: Option<impl Into<String>>) -> Self {
        match value {
            Some(s) => FieldValue::Text(s.into()),
            None => FieldValue::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Ordered map of logical field name to computed value.
///
/// Keys are always a subset of the target schema's declared field names;
/// insertion order follows the correspondence tables, which keeps diffs and
/// logs deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValueMap {
    #[serde(flatten)]
    values: IndexMap<String, FieldValue>,
}

impl FieldValueMap {
    /// Create a new empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Insert a field value, replacing any previous value for the field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Get a field's value. Absent fields read as null.
    #[must_use]
    pub fn get(&self, field: &str) -> &FieldValue {
        self.values.get(field).unwrap_or(&FieldValue::Null)
    }

    /// Check if the field is present in the map (even if null).
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Check if the field is present with a non-null value.
    #[must_use]
    pub fn has_value(&self, field: &str) -> bool {
        self.values
            .get(field)
            .is_some_and(|value| !value.is_null())
    }

    /// Null out a field, keeping its key in the map.
    pub fn set_null(&mut self, field: &str) {
        if let Some(value) = self.values.get_mut(field) {
            *value = FieldValue::Null;
        }
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Get the number of fields in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for FieldValueMap {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_field_reads_as_null() {
        let map = FieldValueMap::new();
        assert!(map.get("email").is_null());
        assert!(!map.contains("email"));
    }

    #[test]
    fn test_null_field_is_present_but_has_no_value() {
        let mut map = FieldValueMap::new();
        map.insert("fax", FieldValue::Null);
        assert!(map.contains("fax"));
        assert!(!map.has_value("fax"));
    }

    #[test]
    fn test_set_null_keeps_the_key() {
        let mut map = FieldValueMap::new();
        map.insert("email", "a@example.edu");
        map.set_null("email");
        assert!(map.contains("email"));
        assert!(map.get("email").is_null());
    }

    #[test]
    fn test_set_null_on_absent_field_is_a_no_op() {
        let mut map = FieldValueMap::new();
        map.set_null("email");
        assert!(!map.contains("email"));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut map = FieldValueMap::new();
        map.insert("last_name", "Curie");
        map.insert("first_name", "Marie");
        map.insert("email", "mcurie@example.edu");

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["last_name", "first_name", "email"]);
    }

    #[test]
    fn test_reference_equality_is_position_sensitive() {
        let id = RecordId::new();
        let a = FieldValue::References(vec![Some(id), None]);
        let b = FieldValue::References(vec![None, Some(id)]);
        assert_ne!(a, b);
        assert_eq!(a, FieldValue::References(vec![Some(id), None]));
    }
}
