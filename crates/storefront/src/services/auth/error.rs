//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] odhanee_core::EmailError),

    /// Display name is too long.
    #[error("display name must be at most {max} characters")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
}
