//! Release-code redaction filter.
//!
//! Applied strictly after mapping and strictly before persistence. A field
//! redacted here must never be re-populated later in the same pass.

use std::collections::BTreeSet;

use edsync_core::{FieldValue, FieldValueMap};

use crate::tables::{
    DIRECTORY_FIELD_MAP, FIELD_EMAIL, FIELD_EMAIL_RELEASE_CODE, FIELD_ENTRY_RELEASE_CODE,
    FIELD_FAX, FIELD_FAX_RELEASE_CODE, FIELD_PHONE, FIELD_PHONE_PRIVATE,
    FIELD_PHONE_RELEASE_CODE, FIELD_PHONE_RELEASE_CODE_PRIVATE, PROFILE_FIELD_MAP,
};

/// Per-field rules: `(release code field, guarded field)`.
const GUARDED_FIELDS: &[(&str, &str)] = &[
    (FIELD_EMAIL_RELEASE_CODE, FIELD_EMAIL),
    (FIELD_FAX_RELEASE_CODE, FIELD_FAX),
    (FIELD_PHONE_RELEASE_CODE, FIELD_PHONE),
    (FIELD_PHONE_RELEASE_CODE_PRIVATE, FIELD_PHONE_PRIVATE),
];

/// Redact fields whose release codes fall outside the allow-list.
///
/// The four per-field rules apply independently. The entry-level rule runs
/// last and is unconditional once triggered: a record failing the overall
/// release check ends up with every mapped field nulled, whatever the
/// per-field rules decided.
pub fn apply_release_policy(values: &mut FieldValueMap, allowed: &BTreeSet<u32>) {
    for (code_field, guarded_field) in GUARDED_FIELDS {
        if values.has_value(code_field)
            && values.has_value(guarded_field)
            && !code_allowed(values.get(code_field), allowed)
        {
            values.set_null(guarded_field);
        }
    }

    if values.has_value(FIELD_ENTRY_RELEASE_CODE)
        && !code_allowed(values.get(FIELD_ENTRY_RELEASE_CODE), allowed)
    {
        for (field, _) in DIRECTORY_FIELD_MAP.iter().chain(PROFILE_FIELD_MAP) {
            values.set_null(field);
        }
    }
}

/// Whether a release-code value is in the allow-list.
///
/// Codes arrive as directory attribute strings; one that does not parse as
/// an integer can never match the allow-list and is treated as disallowed.
fn code_allowed(value: &FieldValue, allowed: &BTreeSet<u32>) -> bool {
    value
        .as_text()
        .and_then(|code| code.trim().parse::<u32>().ok())
        .is_some_and(|code| allowed.contains(&code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> BTreeSet<u32> {
        [1, 2, 3].into_iter().collect()
    }

    fn mapped_values() -> FieldValueMap {
        let mut values = FieldValueMap::new();
        values.insert("display_name", "Marie Curie");
        values.insert(FIELD_EMAIL, "mcurie@example.edu");
        values.insert(FIELD_EMAIL_RELEASE_CODE, "2");
        values.insert(FIELD_FAX, "415-555-0101");
        values.insert(FIELD_FAX_RELEASE_CODE, "2");
        values.insert(FIELD_PHONE, "415-555-0100");
        values.insert(FIELD_PHONE_RELEASE_CODE, "2");
        values.insert(FIELD_PHONE_PRIVATE, "415-555-0199");
        values.insert(FIELD_PHONE_RELEASE_CODE_PRIVATE, "2");
        values.insert(FIELD_ENTRY_RELEASE_CODE, "2");
        values.insert("narrative", "Research summary.");
        values
    }

    #[test]
    fn test_allowed_codes_leave_fields_intact() {
        let mut values = mapped_values();
        apply_release_policy(&mut values, &allow_list());

        assert!(values.has_value(FIELD_EMAIL));
        assert!(values.has_value(FIELD_FAX));
        assert!(values.has_value(FIELD_PHONE));
        assert!(values.has_value(FIELD_PHONE_PRIVATE));
    }

    #[test]
    fn test_disallowed_email_code_redacts_only_email() {
        let mut values = mapped_values();
        values.insert(FIELD_EMAIL_RELEASE_CODE, "9");
        apply_release_policy(&mut values, &allow_list());

        assert!(values.get(FIELD_EMAIL).is_null());
        assert!(values.has_value(FIELD_FAX));
        assert!(values.has_value(FIELD_PHONE));
        // The code itself stays in the map.
        assert!(values.has_value(FIELD_EMAIL_RELEASE_CODE));
    }

    #[test]
    fn test_phone_variants_redact_independently() {
        let mut values = mapped_values();
        values.insert(FIELD_PHONE_RELEASE_CODE_PRIVATE, "9");
        apply_release_policy(&mut values, &allow_list());

        assert!(values.has_value(FIELD_PHONE));
        assert!(values.get(FIELD_PHONE_PRIVATE).is_null());
    }

    #[test]
    fn test_missing_release_code_skips_the_rule() {
        let mut values = mapped_values();
        values.set_null(FIELD_FAX_RELEASE_CODE);
        apply_release_policy(&mut values, &allow_list());

        assert!(values.has_value(FIELD_FAX));
    }

    #[test]
    fn test_entry_lockdown_nulls_every_mapped_field() {
        let mut values = mapped_values();
        values.insert(FIELD_ENTRY_RELEASE_CODE, "9");
        apply_release_policy(&mut values, &allow_list());

        for (field, _) in DIRECTORY_FIELD_MAP.iter().chain(PROFILE_FIELD_MAP) {
            if values.contains(field) {
                assert!(
                    values.get(field).is_null(),
                    "field {field} must be redacted by the entry lockdown"
                );
            }
        }
    }

    #[test]
    fn test_entry_lockdown_overrides_per_field_allowances() {
        // Every per-field code is allowed, the entry code is not: the
        // lockdown must still null the fields the per-field rules kept.
        let mut values = mapped_values();
        values.insert(FIELD_ENTRY_RELEASE_CODE, "9");
        apply_release_policy(&mut values, &allow_list());

        assert!(values.get(FIELD_EMAIL).is_null());
        assert!(values.get("display_name").is_null());
        assert!(values.get("narrative").is_null());
    }

    #[test]
    fn test_unparseable_code_is_never_allowed() {
        let mut values = mapped_values();
        values.insert(FIELD_EMAIL_RELEASE_CODE, "confidential");
        apply_release_policy(&mut values, &allow_list());

        assert!(values.get(FIELD_EMAIL).is_null());
    }

    #[test]
    fn test_fields_outside_the_tables_survive_lockdown() {
        let mut values = mapped_values();
        values.insert(FIELD_ENTRY_RELEASE_CODE, "9");
        values.insert("hook_added_note", "kept");
        apply_release_policy(&mut values, &allow_list());

        assert!(values.has_value("hook_added_note"));
    }
}
