//! Adapters from the `auth` crate to the user domain's hashing and token ports.

use std::time::Duration;

use auth::HasherParams;
use auth::JwtError;
use auth::JwtHandler;
use auth::PasswordError;
use auth::PasswordHasher;

use crate::domain::user::errors::CredentialError;
use crate::domain::user::errors::TokenError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialHasher;
use crate::domain::user::ports::TokenCodec;

/// Argon2id-backed credential hasher
#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    hasher: PasswordHasher,
}

impl Argon2CredentialHasher {
    /// # Errors
    /// * `HashingFailed` - Cost parameters rejected by Argon2
    pub fn new(params: HasherParams) -> Result<Self, PasswordError> {
        Ok(Self {
            hasher: PasswordHasher::with_params(params)?,
        })
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        self.hasher
            .hash(password)
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<(), CredentialError> {
        self.hasher.verify(password, hash).map_err(|e| match e {
            PasswordError::Mismatch => CredentialError::Mismatch,
            other => CredentialError::VerificationFailed(other.to_string()),
        })
    }
}

/// HS256 token codec with a fixed lifetime for every issued token
pub struct JwtTokenCodec {
    handler: JwtHandler,
    ttl: Duration,
}

impl JwtTokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: UserId, email: &str) -> Result<String, TokenError> {
        self.handler
            .issue(user_id.0, email, self.ttl)
            .map_err(TokenError::from)
    }

    fn validate(&self, token: &str) -> Result<(), TokenError> {
        self.handler
            .verify(token)
            .map(|_| ())
            .map_err(TokenError::from)
    }

    fn subject_id(&self, token: &str) -> Result<UserId, TokenError> {
        self.handler
            .subject_id(token)
            .map(UserId)
            .map_err(TokenError::from)
    }
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => TokenError::Expired,
            JwtError::EncodingFailed(msg) => TokenError::IssueFailed(msg),
            JwtError::InvalidToken(msg) => TokenError::Invalid(msg),
            JwtError::MissingClaim(claim) => TokenError::Invalid(format!("missing claim: {}", claim)),
        }
    }
}
