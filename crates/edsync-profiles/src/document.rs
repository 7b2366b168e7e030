//! Profile document model.

use serde_json::{Map, Value};

/// One research-profile document from the Profiles API.
///
/// Documents are nested JSON: scalar properties, one-to-many lists
/// (publications, awards), and one-to-one sub-records. Read-only; produced
/// per lookup and discarded after mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDocument {
    properties: Map<String, Value>,
}

impl ProfileDocument {
    /// Create a document from a JSON object.
    #[must_use]
    pub fn new(properties: Map<String, Value>) -> Self {
        Self { properties }
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    /// Get a property only when it carries a non-empty value.
    ///
    /// Null, empty strings, empty arrays, and empty objects all count as
    /// absent: the source emits them interchangeably for "no data".
    #[must_use]
    pub fn get_non_empty(&self, property: &str) -> Option<&Value> {
        self.get(property).filter(|value| non_empty(value))
    }

    /// The publications list, empty when absent.
    #[must_use]
    pub fn publications(&self) -> &[Value] {
        self.get("Publications")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check if the document has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl From<Map<String, Value>> for ProfileDocument {
    fn from(properties: Map<String, Value>) -> Self {
        Self::new(properties)
    }
}

/// Whether a JSON value carries data.
pub(crate) fn non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> ProfileDocument {
        match value {
            Value::Object(map) => ProfileDocument::new(map),
            _ => panic!("document fixture must be an object"),
        }
    }

    #[test]
    fn test_get_non_empty_filters_empty_values() {
        let doc = document(json!({
            "Narrative": "Research summary.",
            "Keywords": [],
            "FreetextKeywords": "",
            "CollaborationInterests": null,
        }));

        assert!(doc.get_non_empty("Narrative").is_some());
        assert!(doc.get_non_empty("Keywords").is_none());
        assert!(doc.get_non_empty("FreetextKeywords").is_none());
        assert!(doc.get_non_empty("CollaborationInterests").is_none());
        assert!(doc.get_non_empty("Missing").is_none());
    }

    #[test]
    fn test_publications_list() {
        let doc = document(json!({
            "Publications": [
                {"PublicationID": "P1"},
                {"PublicationID": "P2"},
            ],
        }));
        assert_eq!(doc.publications().len(), 2);
    }

    #[test]
    fn test_publications_absent_is_empty() {
        let doc = document(json!({"Narrative": "x"}));
        assert!(doc.publications().is_empty());
    }
}
