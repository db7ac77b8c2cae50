use async_trait::async_trait;

use crate::domain::user::errors::CredentialError;
use crate::domain::user::errors::TokenError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Raw registration input, validated by the service
    ///
    /// # Returns
    /// Stored user entity, including its password hash
    ///
    /// # Errors
    /// * `InvalidEmail`, `InvalidPassword`, `InvalidFirstName`,
    ///   `InvalidLastName`, `InvalidAge` - First failing field rule
    /// * `AlreadyExists` - Email is already registered
    /// * `Credential` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `InvalidEmail` / `EmptyPassword` - Malformed input
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    async fn login_user(&self, command: LoginCommand) -> Result<String, UserError>;

    /// Check a token's signature and expiry.
    ///
    /// # Errors
    /// * `ExpiredToken` - Signature valid but token expired
    /// * `InvalidToken` - Token malformed or signed with another secret
    fn validate_token(&self, token: &str) -> Result<(), UserError>;

    /// Resolve the subject user id carried by a token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token malformed, wrongly signed, or missing its subject
    fn subject_id(&self, token: &str) -> Result<UserId, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Stored user with its assigned id and creation timestamp
    ///
    /// # Errors
    /// * `AlreadyExists` - Storage rejected a duplicate email
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}

/// One-way password hashing.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Produce a salted hash of a plaintext password.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match
    /// * `VerificationFailed` - Stored hash unusable or internal failure
    fn verify(&self, password: &str, hash: &str) -> Result<(), CredentialError>;
}

/// Bearer token issuance and verification.
///
/// Implementations own the signing secret and the token lifetime.
pub trait TokenCodec: Send + Sync + 'static {
    fn issue(&self, user_id: UserId, email: &str) -> Result<String, TokenError>;

    /// # Errors
    /// * `Expired` - Signature valid but token expired
    /// * `Invalid` - Token malformed or signature does not verify
    fn validate(&self, token: &str) -> Result<(), TokenError>;

    /// Verify the signature only and return the subject id.
    fn subject_id(&self, token: &str) -> Result<UserId, TokenError>;
}
