use thiserror::Error;

/// Error type for JWT operations.
///
/// `InvalidToken` and `TokenExpired` stay distinct so callers can report an
/// expired session differently from a forged or malformed token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
