use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a bearer token.
///
/// Identifies the subject (user id and email) and bounds the token's
/// lifetime with an absolute expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject user id
    pub sub: i64,

    /// Subject email
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp, fractional to the millisecond)
    pub exp: f64,
}

impl Claims {
    /// Build claims for a subject, expiring `ttl` after `now`.
    ///
    /// `exp` keeps millisecond precision as a fractional NumericDate.
    pub fn for_subject(
        user_id: i64,
        email: impl Into<String>,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            sub: user_id,
            email: email.into(),
            iat: now.timestamp(),
            exp: expires_at.timestamp_millis() as f64 / 1000.0,
        }
    }

    /// Check whether the token is expired at `now`.
    ///
    /// A token is live only while `exp` is strictly in the future.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires_at_millis()
    }

    fn expires_at_millis(&self) -> i64 {
        (self.exp * 1000.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn instant(secs: i64, millis: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, millis * 1_000_000).unwrap()
    }

    #[test]
    fn test_for_subject() {
        let now = instant(1_000, 0);
        let claims =
            Claims::for_subject(7, "ann@example.com", Duration::from_secs(3600), now);

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "ann@example.com");
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 4_600.0);
    }

    #[test]
    fn test_expiry_keeps_partial_seconds() {
        let now = instant(1_000, 900);
        let claims = Claims::for_subject(1, "a@b.com", Duration::from_secs(1), now);

        assert_eq!(claims.exp, 1_001.9);
        assert!(!claims.is_expired(instant(1_001, 899)));
        assert!(claims.is_expired(instant(1_001, 900)));
        assert!(claims.is_expired(instant(1_001, 950)));
    }

    #[test]
    fn test_is_expired() {
        let claims =
            Claims::for_subject(1, "a@b.com", Duration::from_secs(10), instant(1_000, 0));

        assert!(!claims.is_expired(instant(1_009, 999)));
        assert!(claims.is_expired(instant(1_010, 0))); // Exactly at expiration
        assert!(claims.is_expired(instant(1_011, 0)));
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let now = instant(1_000, 0);
        let claims = Claims::for_subject(1, "a@b.com", Duration::ZERO, now);
        assert!(claims.is_expired(now));
    }
}
