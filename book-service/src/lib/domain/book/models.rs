use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;

/// Book resource entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub title: String,
    /// User that added the book, if known. Informational only.
    pub created_by: Option<UserId>,
}

/// Book identifier, assigned by persistence on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub i64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated book record ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub author: String,
    pub title: String,
    pub created_by: Option<UserId>,
}

/// Command to add a book
#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    pub author: String,
    pub title: String,
    pub created_by: Option<UserId>,
}

impl CreateBookCommand {
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            created_by,
        }
    }
}

/// Command to replace a book's author and title.
///
/// Id, creation timestamp and creator are never changed by an update.
#[derive(Debug, Clone)]
pub struct UpdateBookCommand {
    pub author: String,
    pub title: String,
}

impl UpdateBookCommand {
    pub fn new(author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
        }
    }
}
