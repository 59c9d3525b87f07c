//! Account model types.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `name` and `email` are stored as entered (after trimming); equality
/// between accounts is always decided on the normalized email, never on
/// the stored form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Display name.
    pub name: String,
    /// Email address, the account's unique identifier.
    pub email: String,
    /// Six-digit password, stored in plain text.
    pub password: String,
}

impl Account {
    /// Create an account from already-validated field values.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// The trimmed, lower-cased email used for equality comparisons.
    #[must_use]
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// Whether this account is identified by the given normalized email.
    #[must_use]
    pub fn matches_email(&self, normalized: &str) -> bool {
        self.normalized_email() == normalized
    }
}

/// Normalize an email for comparison: trim surrounding whitespace and
/// lower-case the whole address.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod normalize_email_tests {
        use super::*;

        #[test]
        fn trims_and_lowercases() {
            assert_eq!(normalize_email("  Alex@Gmail.Com "), "alex@gmail.com");
        }

        #[test]
        fn already_normalized_is_unchanged() {
            assert_eq!(normalize_email("alex@gmail.com"), "alex@gmail.com");
        }

        #[test]
        fn empty_stays_empty() {
            assert_eq!(normalize_email("   "), "");
        }
    }

    mod account_tests {
        use super::*;

        #[test]
        fn new_keeps_fields_as_given() {
            let account = Account::new("Alex", "Alex.J@gmail.com", "123456");
            assert_eq!(account.name, "Alex");
            assert_eq!(account.email, "Alex.J@gmail.com");
            assert_eq!(account.password, "123456");
        }

        #[test]
        fn normalized_email_lowercases_stored_form() {
            let account = Account::new("Alex", "Alex.J@Gmail.com", "123456");
            assert_eq!(account.normalized_email(), "alex.j@gmail.com");
        }

        #[test]
        fn matches_email_is_case_insensitive() {
            let account = Account::new("Alex", "ALEX@GMAIL.COM", "123456");
            assert!(account.matches_email("alex@gmail.com"));
            assert!(!account.matches_email("other@gmail.com"));
        }
    }
}
