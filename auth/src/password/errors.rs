use thiserror::Error;

/// Error type for password operations.
///
/// `Mismatch` is the only kind a caller should treat as an authentication
/// failure; the others indicate a broken hash or an internal fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password does not match stored hash")]
    Mismatch,

    #[error("Stored password hash is invalid: {0}")]
    InvalidHash(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
