//! Email validation following RFC 5322.
//!
//! The primary directory lookup is keyed by email address; validation runs
//! before the lookup so a malformed address never reaches the wire.

use std::sync::LazyLock;

/// RFC 5322 compliant email regex pattern.
///
/// Validates the local part (alphanumerics plus common special characters,
/// dot-separated), and a dotted domain with a proper TLD structure.
static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$"
    ).expect("EMAIL_REGEX is a valid regex pattern")
});

/// Maximum allowed email length (per RFC 5321).
const MAX_EMAIL_LENGTH: usize = 254;

/// Check whether the given string is a well-formed email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_standard_email() {
        assert!(is_valid_email("user@example.edu"));
    }

    #[test]
    fn test_valid_email_with_plus_addressing() {
        assert!(is_valid_email("user+tag@example.edu"));
    }

    #[test]
    fn test_valid_email_with_subdomain() {
        assert!(is_valid_email("user@mail.example.edu"));
    }

    #[test]
    fn test_valid_email_trimmed() {
        assert!(is_valid_email("  user@example.edu  "));
    }

    #[test]
    fn test_invalid_email_empty() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("   "));
    }

    #[test]
    fn test_invalid_email_no_at_symbol() {
        assert!(!is_valid_email("invalid-email"));
    }

    #[test]
    fn test_invalid_email_no_domain() {
        assert!(!is_valid_email("user@"));
    }

    #[test]
    fn test_invalid_email_no_local_part() {
        assert!(!is_valid_email("@example.edu"));
    }

    #[test]
    fn test_invalid_email_no_tld() {
        assert!(!is_valid_email("user@example"));
    }

    #[test]
    fn test_invalid_email_too_long() {
        let email = format!("{}@example.edu", "a".repeat(250));
        assert!(!is_valid_email(&email));
    }
}
