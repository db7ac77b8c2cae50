use thiserror::Error;

/// Error for credential hashing and verification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Password does not match")]
    Mismatch,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Error for bearer token operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token issuance failed: {0}")]
    IssueFailed(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    // Validation errors, reported in the order they are checked
    #[error("email must be a valid address")]
    InvalidEmail,

    #[error("password must be at least 6 characters long and contain an uppercase letter, a lowercase letter and a digit")]
    InvalidPassword,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("first name must be at least 2 characters long and contain only letters and spaces")]
    InvalidFirstName,

    #[error("last name must be at least 2 characters long and contain only letters and spaces")]
    InvalidLastName,

    #[error("age must be between 18 and 120")]
    InvalidAge,

    // Domain-level errors
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token is expired")]
    ExpiredToken,

    #[error("Invalid token")]
    InvalidToken,

    // Infrastructure errors
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl UserError {
    /// Whether the error is a rejected input field.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UserError::InvalidEmail
                | UserError::InvalidPassword
                | UserError::EmptyPassword
                | UserError::InvalidFirstName
                | UserError::InvalidLastName
                | UserError::InvalidAge
        )
    }
}
