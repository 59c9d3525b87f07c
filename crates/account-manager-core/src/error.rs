//! Error types for the core library.

use thiserror::Error;

use crate::account::ValidationError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed a validation rule.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An account with the same normalized email already exists.
    #[error("An account with email {email} already exists")]
    DuplicateAccount {
        /// The normalized email that collided.
        email: String,
    },

    /// No account matches the given email.
    #[error("No account found with email {0}")]
    AccountNotFound(String),

    /// Password does not match the stored one.
    #[error("Incorrect password")]
    InvalidCredentials,

    /// Operation requires an authenticated session.
    #[error("Not signed in")]
    Unauthenticated,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
