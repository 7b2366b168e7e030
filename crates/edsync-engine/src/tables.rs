//! Fixed correspondence tables driving field extraction.
//!
//! Three hand-maintained tables map target-record fields to source
//! properties: person fields to EDS attributes, person fields to Profiles
//! properties, and publication fields to Profiles publication properties.
//! The tables are immutable static data; they are not a pluggable schema
//! language.

/// Record type of the person profile entity.
pub const PERSON_RECORD_TYPE: &str = "eds_person_profile";

/// Record type of the publication entity.
pub const PUBLICATION_RECORD_TYPE: &str = "profiles_publication";

/// Revision message written when a person record is synchronized.
pub const PERSON_REVISION_MESSAGE: &str =
    "Record synchronized with source data from EDS and Profiles.";

/// Revision message written when a publication record is synchronized.
pub const PUBLICATION_REVISION_MESSAGE: &str =
    "Record synchronized with source data from Profiles.";

// Person fields referenced by name in mapping and redaction rules.
pub const FIELD_TITLE: &str = "title";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_ADDRESS_PRIVATE: &str = "address_private";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_EMAIL_RELEASE_CODE: &str = "email_release_code";
pub const FIELD_ENTRY_RELEASE_CODE: &str = "entry_release_code";
pub const FIELD_FAX: &str = "fax";
pub const FIELD_FAX_RELEASE_CODE: &str = "fax_release_code";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_PHONE_PRIVATE: &str = "phone_private";
pub const FIELD_PHONE_RELEASE_CODE: &str = "phone_release_code";
pub const FIELD_PHONE_RELEASE_CODE_PRIVATE: &str = "phone_release_code_private";
pub const FIELD_PRIMARY_DEPT_OR_UNIT: &str = "primary_dept_or_unit";
pub const FIELD_AWARDS_HONORS: &str = "awards_honors";
pub const FIELD_COLLAB_INTERESTS: &str = "collab_interests";
pub const FIELD_PUBLICATIONS: &str = "publications";

// Publication fields with special extraction rules.
pub const FIELD_PUBLICATION_ID: &str = "publication_id";
pub const FIELD_SOURCE_NAME: &str = "source_name";
pub const FIELD_SOURCE_URL: &str = "source_url";
pub const FIELD_PMID: &str = "pmid";

// EDS attributes consulted directly by the orchestrator.
pub const ATTR_UID: &str = "uid";
pub const ATTR_UCID: &str = "ucsfEduIDNumber";
pub const ATTR_PRIMARY_DEPARTMENT_NUMBER: &str = "ucsfEduPrimaryDepartmentNumber";

// Profiles properties with nested extraction.
pub const PROP_PUBLICATION_ID: &str = "PublicationID";
pub const PROP_PUBLICATION_SOURCE: &str = "PublicationSource";
pub const PROP_SUMMARY: &str = "Summary";

/// Person field to EDS attribute.
///
/// The `address`/`phone`/`phone_release_code` group is extracted from the
/// campus address sub-entry and the `*_private` group from the
/// private-practice sub-entry; `primary_dept_or_unit` reads the department
/// entry. Everything else reads the person entry itself.
pub const DIRECTORY_FIELD_MAP: &[(&str, &str)] = &[
    (FIELD_ADDRESS, "postalAddress"),
    (FIELD_ADDRESS_PRIVATE, "postalAddress"),
    ("degrees", "ucsfEduDegree"),
    ("display_name", "displayName"),
    (FIELD_EMAIL, "mail"),
    (FIELD_EMAIL_RELEASE_CODE, "ucsfEduMailReleaseCode"),
    (FIELD_ENTRY_RELEASE_CODE, "ucsfEduEntryReleaseCode"),
    (FIELD_FAX, "facsimileTelephoneNumber"),
    (
        FIELD_FAX_RELEASE_CODE,
        "ucsfEduFacsimileTelephoneNumberReleaseCode",
    ),
    ("first_name", "givenName"),
    ("last_name", "sn"),
    ("middle_name", "initials"),
    ("payroll_title", "title"),
    (FIELD_PHONE, "telephoneNumber"),
    (FIELD_PHONE_PRIVATE, "telephoneNumber"),
    (FIELD_PHONE_RELEASE_CODE, "ucsfEduTelephoneNumberReleaseCode"),
    (
        FIELD_PHONE_RELEASE_CODE_PRIVATE,
        "ucsfEduTelephoneNumberReleaseCode",
    ),
    ("preferred_first_name", "ucsfEduPreferredGivenName"),
    ("preferred_pronoun", "ucsfEduPreferredPronoun"),
    (FIELD_PRIMARY_DEPT_OR_UNIT, "ucsfEduDepartmentName"),
    ("ucid", "ucsfEduIDNumber"),
    ("uid", "uid"),
    ("working_title", "ucsfEduWorkingTitle"),
];

/// Person field to Profiles document property.
pub const PROFILE_FIELD_MAP: &[(&str, &str)] = &[
    (FIELD_AWARDS_HONORS, "AwardOrHonors"),
    (FIELD_COLLAB_INTERESTS, "CollaborationInterests"),
    ("freetext_keywords", "FreetextKeywords"),
    ("keywords", "Keywords"),
    ("narrative", "Narrative"),
    (FIELD_PUBLICATIONS, "Publications"),
    ("profile_url", "ProfilesURL"),
];

/// Publication field to Profiles publication property.
///
/// `source_name`, `source_url` and `pmid` read the first element of the
/// nested `PublicationSource` list; the rest read top-level properties.
pub const PUBLICATION_FIELD_MAP: &[(&str, &str)] = &[
    (FIELD_TITLE, "Title"),
    ("author_list", "AuthorList"),
    ("date", "Date"),
    (FIELD_PMID, "PMID"),
    ("publication", "Publication"),
    (FIELD_PUBLICATION_ID, PROP_PUBLICATION_ID),
    (FIELD_SOURCE_NAME, "PublicationSourceName"),
    (FIELD_SOURCE_URL, "PublicationSourceURL"),
];
