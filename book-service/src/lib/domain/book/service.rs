use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;
use crate::domain::book::validation::is_valid_id;
use crate::domain::book::validation::validate_fields;

/// Domain service implementation for book operations.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }

    fn checked_id(id: i64) -> Result<BookId, BookError> {
        if is_valid_id(id) {
            Ok(BookId(id))
        } else {
            Err(BookError::InvalidId)
        }
    }

    async fn existing(&self, id: BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn get_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list_all().await
    }

    async fn get_book(&self, id: i64) -> Result<Book, BookError> {
        let id = Self::checked_id(id)?;
        self.existing(id).await
    }

    async fn add_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        validate_fields(&command.author, &command.title)?;

        let book = self
            .repository
            .insert(NewBook {
                author: command.author,
                title: command.title,
                created_by: command.created_by,
            })
            .await?;

        tracing::info!(
            book_id = %book.id,
            created_by = ?book.created_by.map(|id| id.0),
            "Book added"
        );

        Ok(book)
    }

    async fn update_book(&self, id: i64, command: UpdateBookCommand) -> Result<Book, BookError> {
        let id = Self::checked_id(id)?;
        validate_fields(&command.author, &command.title)?;

        let mut book = self.existing(id).await?;
        book.author = command.author;
        book.title = command.title;

        let book = self.repository.update(book).await?;

        tracing::info!(book_id = %book.id, "Book updated");

        Ok(book)
    }

    async fn delete_book(&self, id: i64) -> Result<(), BookError> {
        let id = Self::checked_id(id)?;
        self.existing(id).await?;

        self.repository.delete(id).await?;

        tracing::info!(book_id = %id, "Book deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestBookRepository {}

        #[async_trait]
        impl BookRepository for TestBookRepository {
            async fn insert(&self, book: NewBook) -> Result<Book, BookError>;
            async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError>;
            async fn list_all(&self) -> Result<Vec<Book>, BookError>;
            async fn update(&self, book: Book) -> Result<Book, BookError>;
            async fn delete(&self, id: BookId) -> Result<(), BookError>;
        }
    }

    fn book(id: i64, author: &str, title: &str) -> Book {
        Book {
            id: BookId(id),
            created_at: Utc::now(),
            author: author.to_string(),
            title: title.to_string(),
            created_by: Some(UserId(1)),
        }
    }

    fn untouched() -> MockTestBookRepository {
        let mut repository = MockTestBookRepository::new();
        repository.expect_insert().times(0);
        repository.expect_find_by_id().times(0);
        repository.expect_list_all().times(0);
        repository.expect_update().times(0);
        repository.expect_delete().times(0);
        repository
    }

    #[tokio::test]
    async fn test_get_books_passthrough() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![book(1, "Tolkien", "The Hobbit"), book(2, "King", "It")]));

        let service = BookService::new(Arc::new(repository));

        let books = service.get_books().await.expect("Listing failed");
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, BookId(1));
        assert_eq!(books[1].title, "It");
    }

    #[tokio::test]
    async fn test_get_books_surfaces_database_error() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_list_all()
            .times(1)
            .returning(|| Err(BookError::DatabaseError("connection lost".to_string())));

        let service = BookService::new(Arc::new(repository));

        assert_eq!(
            service.get_books().await,
            Err(BookError::DatabaseError("connection lost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_book_found() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .withf(|id| *id == BookId(3))
            .times(1)
            .returning(|id| Ok(Some(book(id.0, "King", "The Shining"))));

        let service = BookService::new(Arc::new(repository));

        let found = service.get_book(3).await.expect("Lookup failed");
        assert_eq!(found.author, "King");
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = BookService::new(Arc::new(repository));

        assert_eq!(
            service.get_book(42).await,
            Err(BookError::NotFound(BookId(42)))
        );
    }

    #[tokio::test]
    async fn test_non_positive_id_skips_storage() {
        let service = BookService::new(Arc::new(untouched()));

        for id in [0, -1, i64::MIN] {
            assert_eq!(service.get_book(id).await, Err(BookError::InvalidId));
            assert_eq!(
                service
                    .update_book(id, UpdateBookCommand::new("Tolkien", "The Hobbit"))
                    .await,
                Err(BookError::InvalidId)
            );
            assert_eq!(service.delete_book(id).await, Err(BookError::InvalidId));
        }
    }

    #[tokio::test]
    async fn test_add_book_success() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_insert()
            .withf(|book| {
                book.author == "Tolkien"
                    && book.title == "The Hobbit"
                    && book.created_by == Some(UserId(7))
            })
            .times(1)
            .returning(|new| {
                Ok(Book {
                    id: BookId(4),
                    created_at: Utc::now(),
                    author: new.author,
                    title: new.title,
                    created_by: new.created_by,
                })
            });

        let service = BookService::new(Arc::new(repository));

        let added = service
            .add_book(CreateBookCommand::new("Tolkien", "The Hobbit", Some(UserId(7))))
            .await
            .expect("Add failed");

        assert_eq!(added.id, BookId(4));
        assert_eq!(added.author, "Tolkien");
        assert_eq!(added.title, "The Hobbit");
        assert_eq!(added.created_by, Some(UserId(7)));
    }

    #[tokio::test]
    async fn test_add_book_validation() {
        let service = BookService::new(Arc::new(untouched()));

        assert_eq!(
            service
                .add_book(CreateBookCommand::new("", "", None))
                .await,
            Err(BookError::InvalidAuthor)
        );
        assert_eq!(
            service
                .add_book(CreateBookCommand::new("Tolkien", "", None))
                .await,
            Err(BookError::InvalidTitle)
        );
    }

    #[tokio::test]
    async fn test_update_book_success_keeps_identity() {
        let original = book(5, "Tolkien", "The Hobbit");
        let stored = original.clone();
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let expected_created_at = original.created_at;
        repository
            .expect_update()
            .withf(move |book| {
                book.id == BookId(5)
                    && book.created_at == expected_created_at
                    && book.created_by == Some(UserId(1))
                    && book.author == "J. R. R. Tolkien"
                    && book.title == "The Silmarillion"
            })
            .times(1)
            .returning(|book| Ok(book));

        let service = BookService::new(Arc::new(repository));

        let updated = service
            .update_book(5, UpdateBookCommand::new("J. R. R. Tolkien", "The Silmarillion"))
            .await
            .expect("Update failed");

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.title, "The Silmarillion");
    }

    #[tokio::test]
    async fn test_update_book_not_found() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = BookService::new(Arc::new(repository));

        assert_eq!(
            service
                .update_book(99, UpdateBookCommand::new("Tolkien", "The Hobbit"))
                .await,
            Err(BookError::NotFound(BookId(99)))
        );
    }

    #[tokio::test]
    async fn test_update_book_validation_precedes_existence() {
        // A missing book with invalid fields reports the field error
        let service = BookService::new(Arc::new(untouched()));

        assert_eq!(
            service
                .update_book(99, UpdateBookCommand::new("", "New Title"))
                .await,
            Err(BookError::InvalidAuthor)
        );
        assert_eq!(
            service
                .update_book(99, UpdateBookCommand::new("Tolkien", ""))
                .await,
            Err(BookError::InvalidTitle)
        );
    }

    #[tokio::test]
    async fn test_delete_book_success() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(book(id.0, "King", "It"))));
        repository
            .expect_delete()
            .withf(|id| *id == BookId(2))
            .times(1)
            .returning(|_| Ok(()));

        let service = BookService::new(Arc::new(repository));

        assert_eq!(service.delete_book(2).await, Ok(()));
    }

    #[tokio::test]
    async fn test_delete_book_not_found() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = BookService::new(Arc::new(repository));

        assert_eq!(
            service.delete_book(2).await,
            Err(BookError::NotFound(BookId(2)))
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_reported_as_missing() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(BookError::DatabaseError("timeout".to_string())));
        repository.expect_delete().times(0);

        let service = BookService::new(Arc::new(repository));

        assert!(matches!(
            service.delete_book(2).await,
            Err(BookError::DatabaseError(_))
        ));
    }
}
