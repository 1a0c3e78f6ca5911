//! Authentication error types.

use thiserror::Error;

use juicebar_core::EmailError;

use crate::storage::StorageError;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The email is already registered.
    #[error("email already registered")]
    DuplicateAccount,

    /// No account with the given email.
    #[error("account not found, please sign up")]
    AccountNotFound,

    /// The password does not match the account.
    #[error("incorrect password")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
