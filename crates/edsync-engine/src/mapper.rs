//! Field mapper.
//!
//! Pure, deterministic extraction of target-record field values from the
//! raw source material of one pass: the person directory entry, its two
//! address sub-entries, the department entry, and the profile document.
//! Every rule degrades to null on any missing intermediate; nothing here
//! performs I/O or raises.

use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

use edsync_core::{FieldValue, FieldValueMap, RecordId};
use edsync_directory::DirectoryEntry;
use edsync_profiles::ProfileDocument;

use crate::tables::{
    DIRECTORY_FIELD_MAP, FIELD_ADDRESS, FIELD_ADDRESS_PRIVATE, FIELD_AWARDS_HONORS,
    FIELD_COLLAB_INTERESTS, FIELD_PHONE, FIELD_PHONE_PRIVATE, FIELD_PHONE_RELEASE_CODE,
    FIELD_PHONE_RELEASE_CODE_PRIVATE, FIELD_PRIMARY_DEPT_OR_UNIT, FIELD_PUBLICATIONS,
    PROFILE_FIELD_MAP, PROP_PUBLICATION_ID, PROP_SUMMARY,
};

/// The source material one sync pass maps from.
#[derive(Debug, Clone, Copy)]
pub struct MappingSources<'a> {
    /// The person's primary directory entry.
    pub person: &'a DirectoryEntry,
    /// The campus address sub-entry, when present.
    pub campus_address: Option<&'a DirectoryEntry>,
    /// The private-practice address sub-entry, when present.
    pub practice_address: Option<&'a DirectoryEntry>,
    /// The department entry named by the person's primary department number.
    pub department: Option<&'a DirectoryEntry>,
    /// The profile document, when one was found.
    pub profile: Option<&'a ProfileDocument>,
}

/// Compute the field map for a person record.
///
/// `declared_fields` is the target schema's field set; fields outside it
/// are skipped entirely and never appear in the map. `resolved_publications`
/// is the natural-key to storage-id mapping produced by the publication
/// sub-flow; the publications field is populated from it as an ordered
/// reference list aligned with the source list.
pub fn map_fields(
    sources: &MappingSources<'_>,
    declared_fields: &BTreeSet<String>,
    resolved_publications: &HashMap<String, RecordId>,
) -> FieldValueMap {
    let mut values = FieldValueMap::new();

    for (field, attribute) in DIRECTORY_FIELD_MAP {
        if !declared_fields.contains(*field) {
            continue;
        }
        let value = match *field {
            // Campus group: sourced from the campus address sub-entry.
            FIELD_ADDRESS | FIELD_PHONE | FIELD_PHONE_RELEASE_CODE => {
                first_attribute(sources.campus_address, attribute)
            }
            // Private-practice group: sourced from the private-practice
            // sub-entry, selected by field-name suffix.
            FIELD_ADDRESS_PRIVATE | FIELD_PHONE_PRIVATE | FIELD_PHONE_RELEASE_CODE_PRIVATE => {
                first_attribute(sources.practice_address, attribute)
            }
            FIELD_PRIMARY_DEPT_OR_UNIT => first_attribute(sources.department, attribute),
            _ => first_attribute(Some(sources.person), attribute),
        };
        values.insert(*field, value);
    }

    for (field, property) in PROFILE_FIELD_MAP {
        if !declared_fields.contains(*field) {
            continue;
        }
        let value = match *field {
            FIELD_PUBLICATIONS => publication_references(
                sources
                    .profile
                    .map(ProfileDocument::publications)
                    .unwrap_or_default(),
                resolved_publications,
            ),
            FIELD_AWARDS_HONORS => award_summaries(sources.profile, property),
            FIELD_COLLAB_INTERESTS => collaboration_interests(sources.profile, property),
            _ => verbatim_property(sources.profile, property),
        };
        values.insert(*field, value);
    }

    values
}

/// The natural key of one publication source item.
pub(crate) fn publication_key(item: &Value) -> Option<String> {
    match item.get(PROP_PUBLICATION_ID) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// First element of a multi-valued directory attribute, or null.
fn first_attribute(entry: Option<&DirectoryEntry>, attribute: &str) -> FieldValue {
    FieldValue::from_optional_text(entry.and_then(|e| e.first(attribute)))
}

/// A profile property taken verbatim (scalar or list), or null.
fn verbatim_property(profile: Option<&ProfileDocument>, property: &str) -> FieldValue {
    match profile.and_then(|p| p.get_non_empty(property)) {
        Some(Value::String(s)) => FieldValue::Text(s.clone()),
        Some(Value::Number(n)) => FieldValue::Text(n.to_string()),
        Some(Value::Bool(b)) => FieldValue::Text(b.to_string()),
        Some(Value::Array(items)) => {
            let strings: Vec<String> = items.iter().filter_map(scalar_string).collect();
            if strings.is_empty() {
                FieldValue::Null
            } else {
                FieldValue::List(strings)
            }
        }
        _ => FieldValue::Null,
    }
}

/// Ordered reference list aligned with the source publication list.
///
/// An unresolved key yields null at that position; positions are never
/// dropped, so ordering semantics stay stable across passes.
fn publication_references(
    items: &[Value],
    resolved: &HashMap<String, RecordId>,
) -> FieldValue {
    if items.is_empty() {
        return FieldValue::Null;
    }
    let references = items
        .iter()
        .map(|item| publication_key(item).and_then(|key| resolved.get(&key).copied()))
        .collect();
    FieldValue::References(references)
}

/// Project each award element's `Summary` property.
fn award_summaries(profile: Option<&ProfileDocument>, property: &str) -> FieldValue {
    let summaries: Vec<String> = profile
        .and_then(|p| p.get_non_empty(property))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(PROP_SUMMARY).and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    if summaries.is_empty() {
        FieldValue::Null
    } else {
        FieldValue::List(summaries)
    }
}

/// Split the collaboration-interests `Summary` string on `", "`.
fn collaboration_interests(profile: Option<&ProfileDocument>, property: &str) -> FieldValue {
    match profile
        .and_then(|p| p.get_non_empty(property))
        .and_then(|v| v.get(PROP_SUMMARY))
        .and_then(Value::as_str)
    {
        Some(summary) if !summary.is_empty() => {
            FieldValue::List(summary.split(", ").map(str::to_owned).collect())
        }
        _ => FieldValue::Null,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{DIRECTORY_FIELD_MAP, PROFILE_FIELD_MAP};
    use serde_json::json;

    fn declared_all() -> BTreeSet<String> {
        DIRECTORY_FIELD_MAP
            .iter()
            .chain(PROFILE_FIELD_MAP)
            .map(|(field, _)| (*field).to_string())
            .collect()
    }

    fn person_entry() -> DirectoryEntry {
        DirectoryEntry::new()
            .with("displayName", &["Marie Curie"])
            .with("mail", &["mcurie@example.edu"])
            .with("givenName", &["Marie"])
            .with("sn", &["Curie"])
            .with("ucsfEduDegree", &["PhD", "DSc"])
            .with("ucsfEduMailReleaseCode", &["1"])
            .with("ucsfEduEntryReleaseCode", &["1"])
    }

    fn profile_document(value: serde_json::Value) -> ProfileDocument {
        match value {
            Value::Object(map) => ProfileDocument::new(map),
            _ => panic!("profile fixture must be an object"),
        }
    }

    #[test]
    fn test_mapper_is_pure() {
        let person = person_entry();
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: None,
        };
        let declared = declared_all();
        let resolved = HashMap::new();

        let first = map_fields(&sources, &declared, &resolved);
        let second = map_fields(&sources, &declared, &resolved);
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_element_of_multi_valued_attribute() {
        let person = person_entry();
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: None,
        };
        let values = map_fields(&sources, &declared_all(), &HashMap::new());

        assert_eq!(values.get("degrees"), &FieldValue::Text("PhD".into()));
        assert_eq!(
            values.get("email"),
            &FieldValue::Text("mcurie@example.edu".into())
        );
    }

    #[test]
    fn test_missing_attributes_map_to_explicit_null() {
        let person = DirectoryEntry::new().with("mail", &["mcurie@example.edu"]);
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: None,
        };
        let values = map_fields(&sources, &declared_all(), &HashMap::new());

        assert!(values.contains("display_name"));
        assert!(values.get("display_name").is_null());
        assert!(values.contains("narrative"));
        assert!(values.get("narrative").is_null());
    }

    #[test]
    fn test_undeclared_fields_are_skipped_entirely() {
        let person = person_entry();
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: None,
        };
        let declared: BTreeSet<String> =
            ["email".to_string(), "last_name".to_string()].into_iter().collect();
        let values = map_fields(&sources, &declared, &HashMap::new());

        assert_eq!(values.len(), 2);
        assert!(!values.contains("display_name"));
    }

    #[test]
    fn test_address_groups_select_by_field_suffix() {
        let person = person_entry();
        let campus = DirectoryEntry::new()
            .with("postalAddress", &["505 Parnassus Ave"])
            .with("telephoneNumber", &["415-555-0100"])
            .with("ucsfEduTelephoneNumberReleaseCode", &["1"]);
        let practice = DirectoryEntry::new()
            .with("postalAddress", &["101 Market St"])
            .with("telephoneNumber", &["415-555-0199"])
            .with("ucsfEduTelephoneNumberReleaseCode", &["2"]);

        let sources = MappingSources {
            person: &person,
            campus_address: Some(&campus),
            practice_address: Some(&practice),
            department: None,
            profile: None,
        };
        let values = map_fields(&sources, &declared_all(), &HashMap::new());

        assert_eq!(
            values.get("address"),
            &FieldValue::Text("505 Parnassus Ave".into())
        );
        assert_eq!(
            values.get("address_private"),
            &FieldValue::Text("101 Market St".into())
        );
        assert_eq!(values.get("phone"), &FieldValue::Text("415-555-0100".into()));
        assert_eq!(
            values.get("phone_private"),
            &FieldValue::Text("415-555-0199".into())
        );
        assert_eq!(
            values.get("phone_release_code"),
            &FieldValue::Text("1".into())
        );
        assert_eq!(
            values.get("phone_release_code_private"),
            &FieldValue::Text("2".into())
        );
    }

    #[test]
    fn test_department_field_reads_the_department_entry() {
        let person = person_entry().with("ucsfEduDepartmentName", &["Wrong Source"]);
        let department = DirectoryEntry::new().with("ucsfEduDepartmentName", &["Chemistry"]);
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: Some(&department),
            profile: None,
        };
        let values = map_fields(&sources, &declared_all(), &HashMap::new());

        assert_eq!(
            values.get("primary_dept_or_unit"),
            &FieldValue::Text("Chemistry".into())
        );
    }

    #[test]
    fn test_profile_scalars_and_lists_map_verbatim() {
        let person = person_entry();
        let profile = profile_document(json!({
            "Narrative": "Pioneer of radioactivity research.",
            "Keywords": ["radioactivity", "polonium"],
            "ProfilesURL": "https://profiles.example.edu/marie.curie",
        }));
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: Some(&profile),
        };
        let values = map_fields(&sources, &declared_all(), &HashMap::new());

        assert_eq!(
            values.get("narrative"),
            &FieldValue::Text("Pioneer of radioactivity research.".into())
        );
        assert_eq!(
            values.get("keywords"),
            &FieldValue::List(vec!["radioactivity".into(), "polonium".into()])
        );
    }

    #[test]
    fn test_award_summaries_are_projected() {
        let person = person_entry();
        let profile = profile_document(json!({
            "AwardOrHonors": [
                {"Summary": "1903, Nobel Prize in Physics", "Year": "1903"},
                {"Summary": "1911, Nobel Prize in Chemistry", "Year": "1911"},
                {"Year": "1921"},
            ],
        }));
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: Some(&profile),
        };
        let values = map_fields(&sources, &declared_all(), &HashMap::new());

        assert_eq!(
            values.get("awards_honors"),
            &FieldValue::List(vec![
                "1903, Nobel Prize in Physics".into(),
                "1911, Nobel Prize in Chemistry".into(),
            ])
        );
    }

    #[test]
    fn test_collaboration_interests_split_on_separator() {
        let person = person_entry();
        let profile = profile_document(json!({
            "CollaborationInterests": {"Summary": "mentoring, outreach, lab tours"},
        }));
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: Some(&profile),
        };
        let values = map_fields(&sources, &declared_all(), &HashMap::new());

        assert_eq!(
            values.get("collab_interests"),
            &FieldValue::List(vec![
                "mentoring".into(),
                "outreach".into(),
                "lab tours".into(),
            ])
        );
    }

    #[test]
    fn test_publication_references_preserve_order_and_length() {
        let person = person_entry();
        let profile = profile_document(json!({
            "Publications": [
                {"PublicationID": "P1"},
                {"PublicationID": "P2"},
                {"PublicationID": "P3"},
            ],
        }));
        let p1 = RecordId::new();
        let p3 = RecordId::new();
        let resolved: HashMap<String, RecordId> =
            [("P1".to_string(), p1), ("P3".to_string(), p3)].into_iter().collect();

        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: Some(&profile),
        };
        let values = map_fields(&sources, &declared_all(), &resolved);

        assert_eq!(
            values.get("publications"),
            &FieldValue::References(vec![Some(p1), None, Some(p3)])
        );
    }

    #[test]
    fn test_empty_publication_list_maps_to_null() {
        let person = person_entry();
        let profile = profile_document(json!({ "Publications": [] }));
        let sources = MappingSources {
            person: &person,
            campus_address: None,
            practice_address: None,
            department: None,
            profile: Some(&profile),
        };
        let values = map_fields(&sources, &declared_all(), &HashMap::new());

        assert!(values.get("publications").is_null());
    }

    #[test]
    fn test_publication_key_accepts_numbers() {
        assert_eq!(
            publication_key(&json!({"PublicationID": "P1"})),
            Some("P1".to_string())
        );
        assert_eq!(
            publication_key(&json!({"PublicationID": 42})),
            Some("42".to_string())
        );
        assert_eq!(publication_key(&json!({"Title": "no key"})), None);
    }
}
