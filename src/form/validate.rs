//! Per-field validation rules
//!
//! Each rule looks at a single value and nothing else, so the form can run
//! it on every keystroke as well as on submit.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::Field;

/// Minimum number of characters in a first name (after trimming)
pub const FIRST_NAME_MIN_LEN: usize = 5;

// local@domain.tld, where the tld is at least two letters
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("Invalid email regex")
});

/// A failed validation rule. The display text is what the form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("firstName must have at least 5 characters.")]
    FirstNameTooShort,
    #[error("lastName is a required field.")]
    LastNameRequired,
    #[error("email must be a valid email address.")]
    InvalidEmail,
}

impl FieldError {
    /// The field this error belongs to
    pub fn field(&self) -> Field {
        match self {
            FieldError::FirstNameTooShort => Field::FirstName,
            FieldError::LastNameRequired => Field::LastName,
            FieldError::InvalidEmail => Field::Email,
        }
    }
}

/// Check one field's value against its rule.
pub fn validate(field: Field, value: &str) -> Option<FieldError> {
    match field {
        Field::FirstName => {
            // An empty name is just a short one
            if value.trim().chars().count() < FIRST_NAME_MIN_LEN {
                Some(FieldError::FirstNameTooShort)
            } else {
                None
            }
        }
        Field::LastName => {
            if value.trim().is_empty() {
                Some(FieldError::LastNameRequired)
            } else {
                None
            }
        }
        Field::Email => {
            if is_valid_email(value) {
                None
            } else {
                Some(FieldError::InvalidEmail)
            }
        }
        Field::Message => None,
    }
}

/// Whether `value` has the `local@domain.tld` shape
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name_length() {
        assert_eq!(validate(Field::FirstName, ""), Some(FieldError::FirstNameTooShort));
        assert_eq!(validate(Field::FirstName, "four"), Some(FieldError::FirstNameTooShort));
        assert_eq!(validate(Field::FirstName, "   ab   "), Some(FieldError::FirstNameTooShort));
        assert_eq!(validate(Field::FirstName, "fives"), None);
        assert_eq!(validate(Field::FirstName, "morethanfive"), None);
    }

    #[test]
    fn test_first_name_counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert_eq!(validate(Field::FirstName, "Élèö"), Some(FieldError::FirstNameTooShort));
        assert_eq!(validate(Field::FirstName, "Zoë Ö"), None);
    }

    #[test]
    fn test_last_name_required() {
        assert_eq!(validate(Field::LastName, ""), Some(FieldError::LastNameRequired));
        assert_eq!(validate(Field::LastName, "   "), Some(FieldError::LastNameRequired));
        assert_eq!(validate(Field::LastName, "W"), None);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("email@email.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(is_valid_email("a@b.co"));

        for bad in ["", "E", "no", "a@b", "@email.com", "email@", "email@.com", "a b@c.com", "a@b@c.com", "a@b.c", "a@b.12", "a@b.c0m"] {
            assert_eq!(
                validate(Field::Email, bad),
                Some(FieldError::InvalidEmail),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_message_is_unconstrained() {
        assert_eq!(validate(Field::Message, ""), None);
        assert_eq!(validate(Field::Message, "x"), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FieldError::FirstNameTooShort.to_string(),
            "firstName must have at least 5 characters."
        );
        assert_eq!(FieldError::LastNameRequired.to_string(), "lastName is a required field.");
        assert_eq!(FieldError::InvalidEmail.to_string(), "email must be a valid email address.");
        assert_eq!(FieldError::InvalidEmail.field(), Field::Email);
    }
}
