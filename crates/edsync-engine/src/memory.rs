//! In-memory record store.
//!
//! Backs the test suites and small embeddings. Mirrors the semantics the
//! engine expects from a real CMS store: revisioned saves, a natural-key
//! index queried in bulk, and per-type schema introspection. Failure
//! injection and a resolve-call counter make the collaborator interaction
//! shape assertable.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use edsync_core::error::{Result, SyncError};
use edsync_core::RecordId;

use crate::record::Record;
use crate::store::RecordStore;

#[derive(Default)]
struct Inner {
    schemas: HashMap<String, BTreeSet<String>>,
    records: HashMap<RecordId, Record>,
    /// `(field, value)` predicates; a save whose record matches any of them
    /// fails with a persistence error.
    fail_saves: Vec<(String, String)>,
    save_count: usize,
}

/// In-memory [`RecordStore`] implementation.
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
    resolve_calls: AtomicUsize,
}

impl MemoryRecordStore {
    /// Create an empty store with no registered schemas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a record type and its field names.
    pub async fn register_schema(
        &self,
        record_type: impl Into<String>,
        fields: impl IntoIterator<Item = &str>,
    ) {
        let mut inner = self.inner.write().await;
        inner.schemas.insert(
            record_type.into(),
            fields.into_iter().map(str::to_owned).collect(),
        );
    }

    /// Seed an existing record, assigning it a storage id.
    pub async fn seed(&self, record: Record) -> RecordId {
        let mut record = record;
        let id = record.id().unwrap_or_else(RecordId::new);
        record.mark_persisted(id, "seeded");
        let mut inner = self.inner.write().await;
        inner.records.insert(id, record);
        id
    }

    /// Make every save of a record whose `field` equals `value` fail.
    pub async fn fail_save_when(&self, field: impl Into<String>, value: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.fail_saves.push((field.into(), value.into()));
    }

    /// Get a stored record by id.
    pub async fn get(&self, id: RecordId) -> Option<Record> {
        self.inner.read().await.records.get(&id).cloned()
    }

    /// All stored records of the given type.
    pub async fn records_of_type(&self, record_type: &str) -> Vec<Record> {
        self.inner
            .read()
            .await
            .records
            .values()
            .filter(|record| record.record_type() == record_type)
            .cloned()
            .collect()
    }

    /// Number of successful saves.
    pub async fn save_count(&self) -> usize {
        self.inner.read().await.save_count
    }

    /// Number of batch natural-key resolutions performed.
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load(&self, id: RecordId) -> Result<Option<Record>> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    // Stored records are only replaced on save, so the stored copy is
    // always the pre-mutation revision.
    async fn load_unchanged(&self, id: RecordId) -> Result<Option<Record>> {
        self.load(id).await
    }

    fn create(&self, record_type: &str) -> Record {
        Record::new(record_type)
    }

    async fn save(&self, record: &mut Record, revision_message: &str) -> Result<RecordId> {
        let mut inner = self.inner.write().await;

        if !inner.schemas.contains_key(record.record_type()) {
            return Err(SyncError::persistence(format!(
                "unknown record type '{}'",
                record.record_type()
            )));
        }

        for (field, value) in &inner.fail_saves {
            if record.get(field).as_text() == Some(value.as_str()) {
                return Err(SyncError::persistence(format!(
                    "storage rejected write ({field}={value})"
                )));
            }
        }

        let id = record.id().unwrap_or_else(RecordId::new);
        record.mark_persisted(id, revision_message);
        inner.records.insert(id, record.clone());
        inner.save_count += 1;
        Ok(id)
    }

    async fn resolve_ids(
        &self,
        record_type: &str,
        key_field: &str,
        natural_keys: &[String],
    ) -> Result<HashMap<String, RecordId>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.read().await;
        let mut resolved = HashMap::new();
        for record in inner.records.values() {
            if record.record_type() != record_type {
                continue;
            }
            let Some(key) = record.get(key_field).as_text() else {
                continue;
            };
            if natural_keys.iter().any(|k| k == key) {
                if let Some(id) = record.id() {
                    resolved.insert(key.to_string(), id);
                }
            }
        }
        Ok(resolved)
    }

    async fn field_names(&self, record_type: &str) -> Result<BTreeSet<String>> {
        self.inner
            .read()
            .await
            .schemas
            .get(record_type)
            .cloned()
            .ok_or_else(|| {
                SyncError::persistence(format!("unknown record type '{record_type}'"))
            })
    }
}
