use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::errors::CredentialError;
use crate::domain::user::errors::TokenError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialHasher;
use crate::domain::user::ports::TokenCodec;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::validation::validate_login;
use crate::domain::user::validation::validate_registration;

/// Domain service implementation for user operations.
///
/// Validates input, enforces email uniqueness, and delegates hashing and
/// token handling to injected collaborators. Holds no mutable state.
pub struct UserService<UR, CH, TC>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TC: TokenCodec,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
    tokens: Arc<TC>,
}

impl<UR, CH, TC> UserService<UR, CH, TC>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TC: TokenCodec,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Password hashing implementation
    /// * `tokens` - Bearer token implementation (owns secret and lifetime)
    pub fn new(repository: Arc<UR>, hasher: Arc<CH>, tokens: Arc<TC>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    // Hashing is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<(), UserError> {
        let hasher = Arc::clone(&self.hasher);

        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        verified.map_err(|e| {
            if !matches!(e, CredentialError::Mismatch) {
                tracing::warn!(error = %e, "Stored password hash could not be verified");
            }
            UserError::InvalidCredentials
        })
    }
}

#[async_trait]
impl<UR, CH, TC> UserServicePort for UserService<UR, CH, TC>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TC: TokenCodec,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        validate_registration(&command)?;

        // Not atomic with the insert below; storage rejects duplicates too.
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::AlreadyExists(command.email));
        }

        let age = i32::try_from(command.age).map_err(|_| UserError::InvalidAge)?;
        let password_hash = self.hash_password(command.password).await?;

        let user = self
            .repository
            .insert(NewUser {
                email: command.email,
                password_hash,
                first_name: command.first_name,
                last_name: command.last_name,
                age,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn login_user(&self, command: LoginCommand) -> Result<String, UserError> {
        validate_login(&command.email, &command.password)?;

        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        self.verify_password(command.password, user.password_hash.clone())
            .await?;

        let token = self.tokens.issue(user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }

    fn validate_token(&self, token: &str) -> Result<(), UserError> {
        self.tokens.validate(token).map_err(|e| match e {
            TokenError::Expired => UserError::ExpiredToken,
            TokenError::Invalid(_) | TokenError::IssueFailed(_) => UserError::InvalidToken,
        })
    }

    fn subject_id(&self, token: &str) -> Result<UserId, UserError> {
        self.tokens
            .subject_id(token)
            .map_err(|_| UserError::InvalidToken)
    }
}
