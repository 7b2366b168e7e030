//! CMS record model.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use edsync_core::{FieldValue, RecordId};

use crate::tables::FIELD_TITLE;

/// A CMS record under synchronization: the person profile or one
/// publication.
///
/// The record itself is owned and persisted by the store collaborator; the
/// engine reads current values for diffing and writes new values
/// conditionally. A record without a storage id is new and unsaved.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: Option<RecordId>,
    record_type: String,
    is_new: bool,
    fields: IndexMap<String, FieldValue>,
    revision_log: Option<String>,
    changed_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Create a new, unsaved record of the given type.
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            id: None,
            record_type: record_type.into(),
            is_new: true,
            fields: IndexMap::new(),
            revision_log: None,
            changed_at: None,
        }
    }

    /// Builder-style field setter, for seeding stores and fixtures.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Storage identifier, absent until the record is first saved.
    #[must_use]
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// The record's schema type.
    #[must_use]
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Whether the record has never been saved.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// The record label. For person records this is the email address used
    /// for the primary directory lookup.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.get(FIELD_TITLE).as_text()
    }

    /// Get a field's value. Absent fields read as null.
    #[must_use]
    pub fn get(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(&FieldValue::Null)
    }

    /// Set a field's value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Iterate over fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The revision message recorded at the last save.
    #[must_use]
    pub fn revision_log(&self) -> Option<&str> {
        self.revision_log.as_deref()
    }

    /// When the last revision was written.
    #[must_use]
    pub fn changed_at(&self) -> Option<DateTime<Utc>> {
        self.changed_at
    }

    /// Mark the record persisted under the given id with a revision message.
    ///
    /// Called by store implementations when a save succeeds.
    pub fn mark_persisted(&mut self, id: RecordId, revision_message: &str) {
        self.id = Some(id);
        self.is_new = false;
        self.revision_log = Some(revision_message.to_string());
        self.changed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::PERSON_RECORD_TYPE;

    #[test]
    fn test_new_record_is_new_and_unidentified() {
        let record = Record::new(PERSON_RECORD_TYPE);
        assert!(record.is_new());
        assert!(record.id().is_none());
        assert!(record.label().is_none());
    }

    #[test]
    fn test_label_reads_the_title_field() {
        let record = Record::new(PERSON_RECORD_TYPE).with_field("title", "mcurie@example.edu");
        assert_eq!(record.label(), Some("mcurie@example.edu"));
    }

    #[test]
    fn test_mark_persisted_clears_new_flag() {
        let mut record = Record::new(PERSON_RECORD_TYPE);
        let id = RecordId::new();
        record.mark_persisted(id, "synced");
        assert!(!record.is_new());
        assert_eq!(record.id(), Some(id));
        assert_eq!(record.revision_log(), Some("synced"));
        assert!(record.changed_at().is_some());
    }

    #[test]
    fn test_absent_field_reads_as_null() {
        let record = Record::new(PERSON_RECORD_TYPE);
        assert!(record.get("email").is_null());
    }
}
