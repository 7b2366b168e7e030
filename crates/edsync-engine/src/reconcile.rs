//! Reconciliation: value-level diffing and conditional writes.

use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, error, warn};

use edsync_core::error::Result;
use edsync_core::{FieldValue, FieldValueMap, RecordId};

use crate::mapper::publication_key;
use crate::record::Record;
use crate::store::RecordStore;
use crate::tables::{
    FIELD_PMID, FIELD_PUBLICATION_ID, FIELD_SOURCE_NAME, FIELD_SOURCE_URL,
    PERSON_REVISION_MESSAGE, PROP_PUBLICATION_SOURCE, PUBLICATION_FIELD_MAP,
    PUBLICATION_RECORD_TYPE, PUBLICATION_REVISION_MESSAGE,
};

/// Write the person record if any post-redaction value differs from the
/// stored revision (or the record is new).
///
/// A save failure is logged and reported as "unchanged"; nothing else in
/// the pass is rolled back.
pub(crate) async fn write_person(
    store: &dyn RecordStore,
    record: &mut Record,
    declared_fields: &BTreeSet<String>,
    values: &FieldValueMap,
) -> Result<bool> {
    let unchanged = match record.id() {
        Some(id) => store.load_unchanged(id).await?,
        None => None,
    };

    let mut save_needed = record.is_new();
    for (field, value) in values.iter() {
        if !declared_fields.contains(field) {
            continue;
        }
        record.set(field, value.clone());
        if !save_needed {
            let previous = unchanged
                .as_ref()
                .map_or(&FieldValue::Null, |stored| stored.get(field));
            if previous != value {
                debug!(field = %field, "Field changed since stored revision");
                save_needed = true;
            }
        }
    }

    if !save_needed {
        return Ok(false);
    }

    match store.save(record, PERSON_REVISION_MESSAGE).await {
        Ok(_) => Ok(true),
        Err(err) => {
            error!(error = %err, "Error saving person record");
            Ok(false)
        }
    }
}

/// Create or update publication records for one person's publication list.
///
/// Natural keys are resolved to storage ids in a single batch query; each
/// source item is then loaded-or-created, diffed field by field, and saved
/// only on change. The returned map holds the storage id for every item
/// that was successfully saved or already existed; a failing item is
/// omitted (leaving a null reference at its list position) without
/// aborting the batch.
pub(crate) async fn sync_publications(
    store: &dyn RecordStore,
    items: &[Value],
) -> Result<HashMap<String, RecordId>> {
    let natural_keys: Vec<String> = items.iter().filter_map(publication_key).collect();
    if natural_keys.is_empty() {
        return Ok(HashMap::new());
    }

    let mut resolved = store
        .resolve_ids(PUBLICATION_RECORD_TYPE, FIELD_PUBLICATION_ID, &natural_keys)
        .await?;
    let declared_fields = store.field_names(PUBLICATION_RECORD_TYPE).await?;

    for item in items {
        let Some(key) = publication_key(item) else {
            continue;
        };

        let mut record = match resolved.get(&key) {
            Some(id) => match store.load(*id).await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    warn!(publication_id = %key, "Indexed publication record missing from storage");
                    resolved.remove(&key);
                    continue;
                }
                Err(err) => {
                    error!(publication_id = %key, error = %err, "Failed to load publication record");
                    resolved.remove(&key);
                    continue;
                }
            },
            None => store.create(PUBLICATION_RECORD_TYPE),
        };

        let mut save_needed = record.is_new();
        for (field, property) in PUBLICATION_FIELD_MAP {
            if !declared_fields.contains(*field) {
                continue;
            }
            let source_value = publication_value(item, field, property);
            if record.get(field) != &source_value {
                record.set(*field, source_value);
                save_needed = true;
            }
        }

        if save_needed {
            if let Err(err) = store.save(&mut record, PUBLICATION_REVISION_MESSAGE).await {
                error!(publication_id = %key, error = %err, "Failed to save publication");
            }
        }

        // Only items that were saved or already existed contribute an id.
        match record.id() {
            Some(id) => {
                resolved.insert(key, id);
            }
            None => {
                resolved.remove(&key);
            }
        }
    }

    Ok(resolved)
}

/// Extract one publication field's source value.
///
/// `source_name`, `source_url` and `pmid` live on the first element of the
/// nested `PublicationSource` list; everything else is a top-level
/// property.
fn publication_value(item: &Value, field: &str, property: &str) -> FieldValue {
    let raw = match field {
        FIELD_SOURCE_NAME | FIELD_SOURCE_URL | FIELD_PMID => item
            .get(PROP_PUBLICATION_SOURCE)
            .and_then(|sources| sources.get(0))
            .and_then(|source| source.get(property)),
        _ => item.get(property),
    };
    match raw {
        Some(Value::String(s)) => FieldValue::Text(s.clone()),
        Some(Value::Number(n)) => FieldValue::Text(n.to_string()),
        _ => FieldValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRecordStore;
    use serde_json::json;

    const PUBLICATION_FIELDS: [&str; 8] = [
        "title",
        "author_list",
        "date",
        "pmid",
        "publication",
        "publication_id",
        "source_name",
        "source_url",
    ];

    fn publication_item(id: &str, title: &str) -> Value {
        json!({
            "PublicationID": id,
            "Title": title,
            "AuthorList": "Curie M, Curie P",
            "Date": "1898-12-26",
            "Publication": "Comptes rendus",
            "PublicationSource": [{
                "PublicationSourceName": "PubMed",
                "PublicationSourceURL": format!("https://pubmed.example.gov/{id}"),
                "PMID": "12345",
            }],
        })
    }

    async fn store_with_schema() -> MemoryRecordStore {
        let store = MemoryRecordStore::new();
        store
            .register_schema(PUBLICATION_RECORD_TYPE, PUBLICATION_FIELDS)
            .await;
        store
    }

    #[tokio::test]
    async fn test_new_publication_is_created() {
        let store = store_with_schema().await;
        let items = vec![publication_item("P1", "On a new radioactive substance")];

        let resolved = sync_publications(&store, &items).await.unwrap();

        assert_eq!(resolved.len(), 1);
        let id = resolved["P1"];
        let record = store.get(id).await.unwrap();
        assert_eq!(
            record.get("title"),
            &FieldValue::Text("On a new radioactive substance".into())
        );
        assert_eq!(
            record.get("source_name"),
            &FieldValue::Text("PubMed".into())
        );
        assert_eq!(record.get("pmid"), &FieldValue::Text("12345".into()));
    }

    #[tokio::test]
    async fn test_unchanged_publication_is_not_resaved() {
        let store = store_with_schema().await;
        let items = vec![publication_item("P1", "Title")];

        sync_publications(&store, &items).await.unwrap();
        let saves_after_first = store.save_count().await;

        sync_publications(&store, &items).await.unwrap();
        assert_eq!(store.save_count().await, saves_after_first);
    }

    #[tokio::test]
    async fn test_changed_publication_is_updated_in_place() {
        let store = store_with_schema().await;

        let first = vec![publication_item("P1", "Old title")];
        let resolved_first = sync_publications(&store, &first).await.unwrap();

        let second = vec![publication_item("P1", "New title")];
        let resolved_second = sync_publications(&store, &second).await.unwrap();

        assert_eq!(resolved_first["P1"], resolved_second["P1"]);
        let record = store.get(resolved_second["P1"]).await.unwrap();
        assert_eq!(record.get("title"), &FieldValue::Text("New title".into()));
        let all = store.records_of_type(PUBLICATION_RECORD_TYPE).await;
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_resolution_is_one_call() {
        let store = store_with_schema().await;
        let items = vec![
            publication_item("P1", "One"),
            publication_item("P2", "Two"),
            publication_item("P3", "Three"),
        ];

        sync_publications(&store, &items).await.unwrap();
        assert_eq!(store.resolve_calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_item_is_isolated() {
        let store = store_with_schema().await;
        store.fail_save_when("publication_id", "P2").await;
        let items = vec![
            publication_item("P1", "One"),
            publication_item("P2", "Two"),
            publication_item("P3", "Three"),
        ];

        let resolved = sync_publications(&store, &items).await.unwrap();

        assert!(resolved.contains_key("P1"));
        assert!(!resolved.contains_key("P2"));
        assert!(resolved.contains_key("P3"));
    }

    #[tokio::test]
    async fn test_items_without_keys_are_skipped() {
        let store = store_with_schema().await;
        let items = vec![json!({"Title": "No identifier"})];

        let resolved = sync_publications(&store, &items).await.unwrap();
        assert!(resolved.is_empty());
        // No keys to resolve means no batch query either.
        assert_eq!(store.resolve_calls(), 0);
    }
}
