//! Authentication primitives shared by the HTTP services.
//!
//! - Password hashing (Argon2id, tunable cost)
//! - Bearer token issuance and verification (HS256 JWT)
//!
//! Services define their own authentication ports and adapt these
//! implementations behind them.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Passw0rd").unwrap();
//! assert!(hasher.verify("Passw0rd", &hash).is_ok());
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use std::time::Duration;
//!
//! use auth::JwtHandler;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue(1, "ann@example.com", Duration::from_secs(3600)).unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, 1);
//! assert_eq!(handler.subject_id(&token).unwrap(), 1);
//! ```

pub mod jwt;
pub mod password;

pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HasherParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
