use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::UpdateBookCommand;

/// Port for book domain service operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// List every stored book, ordered by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_books(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve a single book.
    ///
    /// # Errors
    /// * `InvalidId` - Id is not a positive integer
    /// * `NotFound` - No book with this id
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, id: i64) -> Result<Book, BookError>;

    /// Validate and store a new book.
    ///
    /// # Errors
    /// * `InvalidAuthor` / `InvalidTitle` - Empty field, author checked first
    /// * `DatabaseError` - Database operation failed
    async fn add_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// Replace author and title of an existing book.
    ///
    /// Field validation runs before the existence check.
    ///
    /// # Errors
    /// * `InvalidId`, `InvalidAuthor`, `InvalidTitle` - In that order
    /// * `NotFound` - No book with this id
    /// * `DatabaseError` - Database operation failed
    async fn update_book(&self, id: i64, command: UpdateBookCommand) -> Result<Book, BookError>;

    /// Remove an existing book.
    ///
    /// # Errors
    /// * `InvalidId` - Id is not a positive integer
    /// * `NotFound` - No book with this id
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, id: i64) -> Result<(), BookError>;
}

/// Persistence operations for book aggregate.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Persist new book, returning it with its assigned id and timestamp.
    async fn insert(&self, book: NewBook) -> Result<Book, BookError>;

    /// # Returns
    /// Optional book entity (None if not found)
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError>;

    /// All books ordered by id.
    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    /// Overwrite author and title of the stored row matching `book.id`.
    ///
    /// # Errors
    /// * `NotFound` - Row disappeared before the write
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - Row disappeared before the write
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: BookId) -> Result<(), BookError>;
}
