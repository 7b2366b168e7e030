//! Sync orchestrator.
//!
//! Ties the directory client, profiles client, mapper, redaction filter,
//! hook registry, and reconciliation together for a single record. One
//! pass per invocation; every intermediate structure is pass-local.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use edsync_core::error::Result;
use edsync_core::{is_valid_email, Lookup, RecordId, SyncSettings};
use edsync_directory::{AddressType, DirectoryClient};
use edsync_profiles::ProfilesClient;

use crate::hooks::{HookContext, HookRegistry};
use crate::mapper::{self, MappingSources};
use crate::reconcile;
use crate::record::Record;
use crate::redact;
use crate::store::RecordStore;
use crate::tables::{
    ATTR_PRIMARY_DEPARTMENT_NUMBER, ATTR_UCID, ATTR_UID, FIELD_PUBLICATIONS, PERSON_RECORD_TYPE,
};

/// Terminal state of one sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The record's type does not match the synchronizable schema.
    NotApplicable,
    /// No directory connection is configured; no lookups were attempted.
    Unavailable,
    /// The record carries no email, or a malformed one; lookup skipped.
    InvalidEmail,
    /// The directory was reachable but the lookup failed.
    LookupFailed,
    /// The directory was reachable and holds no entry for the email.
    /// Archival of such records is intentionally not performed.
    NotFound,
    /// The pass ran to completion.
    Completed {
        /// Whether a new revision of the person record was written.
        changed: bool,
    },
}

impl SyncOutcome {
    /// Whether the pass wrote a new revision of the person record.
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, SyncOutcome::Completed { changed: true })
    }

    /// The user-facing message for the interactive trigger.
    ///
    /// Exactly one of three strings: updated, no change, or not applicable.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            SyncOutcome::Completed { changed: true } => "Updated.",
            SyncOutcome::Completed { changed: false }
            | SyncOutcome::NotFound
            | SyncOutcome::LookupFailed
            | SyncOutcome::InvalidEmail => "No change.",
            SyncOutcome::NotApplicable | SyncOutcome::Unavailable => {
                "Nothing happened - synchronization only applies to person profile \
                 records with a directory connection configured."
            }
        }
    }
}

/// Orchestrates sync passes. Shared by the interactive trigger and the
/// background queue worker, which must behave identically.
pub struct SyncEngine {
    directory: Arc<dyn DirectoryClient>,
    profiles: Arc<dyn ProfilesClient>,
    store: Arc<dyn RecordStore>,
    hooks: HookRegistry,
    settings: SyncSettings,
}

impl SyncEngine {
    /// Create a new engine.
    pub fn new(
        directory: Arc<dyn DirectoryClient>,
        profiles: Arc<dyn ProfilesClient>,
        store: Arc<dyn RecordStore>,
        hooks: HookRegistry,
        settings: SyncSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            directory,
            profiles,
            store,
            hooks,
            settings,
        })
    }

    /// The engine's deployment settings.
    #[must_use]
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Load a record by id and run one sync pass over it.
    #[instrument(skip(self))]
    pub async fn sync_by_id(&self, id: RecordId) -> Result<SyncOutcome> {
        match self.store.load(id).await? {
            Some(mut record) => self.sync_record(&mut record).await,
            None => {
                debug!(record_id = %id, "Record not found in storage");
                Ok(SyncOutcome::NotApplicable)
            }
        }
    }

    /// Run one sync pass over the given record.
    #[instrument(skip_all, fields(record_id = ?record.id()))]
    pub async fn sync_record(&self, record: &mut Record) -> Result<SyncOutcome> {
        if record.record_type() != PERSON_RECORD_TYPE {
            return Ok(SyncOutcome::NotApplicable);
        }
        if !self.directory.is_available() {
            return Ok(SyncOutcome::Unavailable);
        }

        let Some(email) = record.label().map(str::to_owned) else {
            error!("Required email value is missing");
            return Ok(SyncOutcome::InvalidEmail);
        };
        if !is_valid_email(&email) {
            error!("Required email is not a valid email address");
            return Ok(SyncOutcome::InvalidEmail);
        }

        let person = match self.directory.search_by_email(&email).await {
            Lookup::Found(entry) => entry,
            // No EDS record. Archival remains a no-op here.
            Lookup::NotFound => return Ok(SyncOutcome::NotFound),
            Lookup::Unavailable => return Ok(SyncOutcome::Unavailable),
            Lookup::Error(detail) => {
                error!(error = %detail, "EDS search by email failed - unable to continue sync");
                return Ok(SyncOutcome::LookupFailed);
            }
        };

        // Sub-lookups are keyed off the primary entry; each degrades to
        // "no source material" for mapping when it yields nothing.
        let uid = person.first(ATTR_UID).map(str::to_owned);
        let campus_address = match &uid {
            Some(uid) => self
                .directory
                .search_address(uid, AddressType::Campus)
                .await
                .into_found(),
            None => None,
        };
        let practice_address = match &uid {
            Some(uid) => self
                .directory
                .search_address(uid, AddressType::PrivatePractice)
                .await
                .into_found(),
            None => None,
        };

        let department = match person.first(ATTR_PRIMARY_DEPARTMENT_NUMBER) {
            Some(department_number) => self
                .directory
                .search_by_department(department_number)
                .await
                .into_found(),
            None => None,
        };

        let ucid = person.first(ATTR_UCID).map(str::to_owned);
        let profile = match &ucid {
            Some(ucid) => self.profiles.search_by_identifier(ucid).await.into_found(),
            None => None,
        };

        // Declared schema fields, queried once and cached for the pass.
        let declared_fields = self.store.field_names(PERSON_RECORD_TYPE).await?;

        let publication_items: Vec<Value> = profile
            .as_ref()
            .map(|p| p.publications().to_vec())
            .unwrap_or_default();
        let resolved_publications =
            if declared_fields.contains(FIELD_PUBLICATIONS) && !publication_items.is_empty() {
                reconcile::sync_publications(self.store.as_ref(), &publication_items).await?
            } else {
                HashMap::new()
            };

        let sources = MappingSources {
            person: &person,
            campus_address: campus_address.as_ref(),
            practice_address: practice_address.as_ref(),
            department: department.as_ref(),
            profile: profile.as_ref(),
        };
        let mut values = mapper::map_fields(&sources, &declared_fields, &resolved_publications);

        redact::apply_release_policy(&mut values, &self.settings.allowed_release_codes);

        let context = HookContext {
            record,
            person: &person,
            campus_address: campus_address.as_ref(),
            practice_address: practice_address.as_ref(),
            department: department.as_ref(),
            profile: profile.as_ref(),
        };
        let values = self.hooks.apply(values, &context)?;

        let changed =
            reconcile::write_person(self.store.as_ref(), record, &declared_fields, &values)
                .await?;
        if changed {
            info!(email = %email, "Person record synchronized");
        }
        Ok(SyncOutcome::Completed { changed })
    }
}
