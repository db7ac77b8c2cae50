use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying bearer tokens.
///
/// Tokens are signed with HS256 under a shared secret. Signature and expiry
/// are checked separately so the two failure kinds never collapse into one.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

/// Subject-only view of a token payload.
#[derive(Debug, Deserialize)]
struct SubjectClaim {
    sub: Option<i64>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for a subject, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: i64, email: &str, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(user_id, email, ttl, Utc::now())
    }

    /// Issue a token for a subject, valid for `ttl` from `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_subject(user_id, email, ttl, now);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry of a token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed or its signature does not verify
    /// * `TokenExpired` - Signature is valid but `exp` is not in the future
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature and expiry of a token against `now`.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed or its signature does not verify
    /// * `TokenExpired` - Signature is valid but `exp` is not after `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims: Claims = self.decode_signed(token)?;

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    /// Extract the subject id after verifying the signature.
    ///
    /// Expiry is not checked here; callers validate it first.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed or its signature does not verify
    /// * `MissingClaim` - Token carries no `sub` claim
    pub fn subject_id(&self, token: &str) -> Result<i64, JwtError> {
        let subject: SubjectClaim = self.decode_signed(token)?;

        subject
            .sub
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))
    }

    fn decode_signed<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is evaluated by the caller with exact, leeway-free semantics
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}
