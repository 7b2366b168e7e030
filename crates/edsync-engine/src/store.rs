//! Persistence collaborator contract.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

use edsync_core::error::Result;
use edsync_core::RecordId;

use crate::record::Record;

/// Storage collaborator owning the CMS records.
///
/// The engine depends on this contract only; the host system provides the
/// actual revisioned storage. All failures surface as
/// [`edsync_core::SyncError::Persistence`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load a record by storage id.
    async fn load(&self, id: RecordId) -> Result<Option<Record>>;

    /// Load the stored (pre-mutation) revision of a record, for diffing.
    async fn load_unchanged(&self, id: RecordId) -> Result<Option<Record>>;

    /// Create a new, unsaved record of the given type.
    fn create(&self, record_type: &str) -> Record;

    /// Persist the record as a new revision and return its storage id.
    ///
    /// On success the record is marked persisted (id assigned, new flag
    /// cleared, revision message recorded).
    async fn save(&self, record: &mut Record, revision_message: &str) -> Result<RecordId>;

    /// Resolve natural keys to storage ids in one batch query.
    ///
    /// Returns a mapping for the keys that exist; absent keys are simply
    /// missing from the result. Called at most once per sync pass.
    async fn resolve_ids(
        &self,
        record_type: &str,
        key_field: &str,
        natural_keys: &[String],
    ) -> Result<HashMap<String, RecordId>>;

    /// The field names declared on the given record type's schema.
    ///
    /// Queried once per pass and cached pass-locally; mapped fields outside
    /// this set are silently dropped.
    async fn field_names(&self, record_type: &str) -> Result<BTreeSet<String>>;
}
