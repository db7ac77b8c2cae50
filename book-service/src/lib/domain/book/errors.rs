use thiserror::Error;

use crate::domain::book::models::BookId;

/// Top-level error for all book-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    // Validation errors
    #[error("id must be a positive integer")]
    InvalidId,

    #[error("author must not be empty")]
    InvalidAuthor,

    #[error("title must not be empty")]
    InvalidTitle,

    // Domain-level errors
    #[error("Book not found: {0}")]
    NotFound(BookId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl BookError {
    /// Whether the error is a rejected input field.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BookError::InvalidId | BookError::InvalidAuthor | BookError::InvalidTitle
        )
    }
}
