//! Directory entry model.

use std::collections::HashMap;

use ldap3::SearchEntry;

/// One directory search result: a case-insensitive attribute-name to
/// multi-valued-string mapping.
///
/// Absent attributes read as `None`, never an error; the mapper degrades
/// them to null field values. Entries are produced per lookup and discarded
/// after mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Attribute values keyed by lowercased attribute name.
    attributes: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    /// Create an empty entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute's values, replacing any previous values.
    pub fn set(&mut self, attribute: &str, values: impl IntoIterator<Item = impl Into<String>>) {
        self.attributes.insert(
            attribute.to_ascii_lowercase(),
            values.into_iter().map(Into::into).collect(),
        );
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with(mut self, attribute: &str, values: &[&str]) -> Self {
        self.set(attribute, values.iter().copied());
        self
    }

    /// Check whether the attribute is present with at least one value.
    #[must_use]
    pub fn has(&self, attribute: &str) -> bool {
        self.attributes
            .get(&attribute.to_ascii_lowercase())
            .is_some_and(|values| !values.is_empty())
    }

    /// Get all values of an attribute.
    #[must_use]
    pub fn values(&self, attribute: &str) -> Option<&[String]> {
        self.attributes
            .get(&attribute.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// Get the first value of an attribute.
    #[must_use]
    pub fn first(&self, attribute: &str) -> Option<&str> {
        self.values(attribute)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Number of attributes on the entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the entry has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl From<SearchEntry> for DirectoryEntry {
    fn from(entry: SearchEntry) -> Self {
        let mut result = Self::new();
        for (attribute, values) in entry.attrs {
            result.set(&attribute, values);
        }
        result
    }
}
