//! Per-field and full-form validation.
//!
//! Rules are evaluated in priority order with first match winning: required,
//! then the field-specific rule. Cross-field rules always read the snapshot
//! passed in, so confirm-password is checked against the password value that
//! is current at validation time.

use crate::directory::UserDirectory;
use crate::state::{ErrorMap, Field, FormData};

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_COMPLEXITY_MESSAGE: &str =
    "Password must be at least 8 characters long, include at least one letter, and one number.";
const USERNAME_TAKEN_MESSAGE: &str = "Username is already taken.";
const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";

/// Validate a single field value against the snapshot and directory.
/// Returns the error message for the first violated rule, or `None` when
/// the field satisfies its rules.
///
pub fn validate_field(
    field: Field,
    value: &str,
    snapshot: &FormData,
    directory: &dyn UserDirectory,
) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} is required.", field.message_label()));
    }

    match field {
        Field::Username => {
            if directory.contains(value) {
                return Some(USERNAME_TAKEN_MESSAGE.to_string());
            }
        }
        Field::Password => {
            if !password_is_complex(value) {
                return Some(PASSWORD_COMPLEXITY_MESSAGE.to_string());
            }
        }
        Field::ConfirmPassword => {
            if value != snapshot.password {
                return Some(PASSWORD_MISMATCH_MESSAGE.to_string());
            }
        }
        Field::DisplayName | Field::ProfilePictureRef => {}
    }
    None
}

/// Validate every field against one consistent snapshot, collecting all
/// errors. An empty map means the form may be submitted.
///
pub fn validate_all(snapshot: &FormData, directory: &dyn UserDirectory) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in Field::ALL {
        if let Some(message) = validate_field(field, snapshot.get(field), snapshot, directory) {
            errors.insert(field.name().to_string(), message);
        }
    }
    errors
}

fn password_is_complex(value: &str) -> bool {
    value.len() >= PASSWORD_MIN_LENGTH
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;

    fn empty_directory() -> InMemoryDirectory {
        InMemoryDirectory::new()
    }

    #[test]
    fn every_field_requires_a_non_blank_value() {
        let snapshot = FormData::default();
        let directory = empty_directory();
        for field in Field::ALL {
            let error = validate_field(field, "", &snapshot, &directory);
            assert_eq!(
                error,
                Some(format!("{} is required.", field.message_label()))
            );
            // Whitespace-only counts as empty
            let error = validate_field(field, "   ", &snapshot, &directory);
            assert!(error.is_some());
        }
    }

    #[test]
    fn username_present_in_directory_is_rejected() {
        let snapshot = FormData::default();
        let directory: InMemoryDirectory = ["alice"].into_iter().collect();
        assert_eq!(
            validate_field(Field::Username, "alice", &snapshot, &directory),
            Some("Username is already taken.".to_string())
        );
        assert_eq!(
            validate_field(Field::Username, "bob", &snapshot, &directory),
            None
        );
    }

    #[test]
    fn password_complexity_rules() {
        let snapshot = FormData::default();
        let directory = empty_directory();
        // Too short and missing a digit
        assert!(validate_field(Field::Password, "abc", &snapshot, &directory).is_some());
        // Long enough but missing a letter
        assert!(validate_field(Field::Password, "12345678", &snapshot, &directory).is_some());
        // Long enough but missing a digit
        assert!(validate_field(Field::Password, "abcdefgh", &snapshot, &directory).is_some());
        assert_eq!(
            validate_field(Field::Password, "abcdefg1", &snapshot, &directory),
            None
        );
    }

    #[test]
    fn confirm_password_checks_current_password() {
        let directory = empty_directory();
        let snapshot = FormData {
            password: "abcdefg1".to_string(),
            ..FormData::default()
        };
        assert_eq!(
            validate_field(Field::ConfirmPassword, "abcdefg1", &snapshot, &directory),
            None
        );
        assert_eq!(
            validate_field(Field::ConfirmPassword, "abcdefg2", &snapshot, &directory),
            Some("Passwords do not match.".to_string())
        );
    }

    #[test]
    fn display_name_and_picture_are_required_only() {
        let snapshot = FormData::default();
        let directory = empty_directory();
        assert_eq!(
            validate_field(Field::DisplayName, "Alice A.", &snapshot, &directory),
            None
        );
        assert_eq!(
            validate_field(
                Field::ProfilePictureRef,
                "avatars/alice.png",
                &snapshot,
                &directory
            ),
            None
        );
    }

    #[test]
    fn validate_all_collects_every_error() {
        let directory: InMemoryDirectory = ["alice"].into_iter().collect();
        let snapshot = FormData {
            username: "alice".to_string(),
            password: "short".to_string(),
            confirm_password: "different".to_string(),
            display_name: String::new(),
            profile_picture_ref: "pic.png".to_string(),
        };
        let errors = validate_all(&snapshot, &directory);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors["username"], "Username is already taken.");
        assert!(errors["password"].contains("at least 8 characters"));
        assert_eq!(errors["confirmpassword"], "Passwords do not match.");
        assert_eq!(errors["displayname"], "Displayname is required.");
        assert!(!errors.contains_key("profilepic"));
    }

    #[test]
    fn validate_all_on_clean_form_is_empty() {
        let directory = empty_directory();
        let snapshot = FormData {
            username: "bob".to_string(),
            password: "abcdefg1".to_string(),
            confirm_password: "abcdefg1".to_string(),
            display_name: "Bob".to_string(),
            profile_picture_ref: "pic.png".to_string(),
        };
        assert!(validate_all(&snapshot, &directory).is_empty());
    }
}
