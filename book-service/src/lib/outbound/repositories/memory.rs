use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::NewBook;
use crate::domain::book::ports::BookRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Rows keyed by id with a monotonically increasing id counter.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-process storage backend for tests and local runs.
///
/// Each table sits behind its own lock. User inserts check email uniqueness
/// while holding the write lock, so concurrent registrations of the same
/// email cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Table<User>>,
    books: RwLock<Table<Book>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every row and restart ids at 1.
    pub async fn reset(&self) {
        *self.users.write().await = Table::default();
        *self.books.write().await = Table::default();
    }

    /// Reset the store, then insert the given users and books in order.
    ///
    /// Users get ids 1..=n in the order given, so books may refer to them
    /// through `created_by`.
    ///
    /// # Errors
    /// * `AlreadyExists` - Two seed users share an email
    pub async fn seed(&self, users: Vec<NewUser>, books: Vec<NewBook>) -> Result<(), UserError> {
        self.reset().await;

        for user in users {
            UserRepository::insert(self, user).await?;
        }
        for book in books {
            BookRepository::insert(self, book)
                .await
                .map_err(|e| UserError::Unknown(e.to_string()))?;
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let mut table = self.users.write().await;

        if table.rows.values().any(|u| u.email == user.email) {
            return Err(UserError::AlreadyExists(user.email));
        }

        let id = table.allocate_id();
        let stored = User {
            id: UserId(id),
            created_at: Utc::now(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            age: user.age,
        };
        table.rows.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let table = self.users.read().await;

        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BookRepository for InMemoryStore {
    async fn insert(&self, book: NewBook) -> Result<Book, BookError> {
        let mut table = self.books.write().await;

        let id = table.allocate_id();
        let stored = Book {
            id: BookId(id),
            created_at: Utc::now(),
            author: book.author,
            title: book.title,
            created_by: book.created_by,
        };
        table.rows.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError> {
        Ok(self.books.read().await.rows.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.books.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let mut table = self.books.write().await;

        let stored = table
            .rows
            .get_mut(&book.id.0)
            .ok_or(BookError::NotFound(book.id))?;
        stored.author = book.author;
        stored.title = book.title;

        Ok(stored.clone())
    }

    async fn delete(&self, id: BookId) -> Result<(), BookError> {
        self.books
            .write()
            .await
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(BookError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            age: 30,
        }
    }

    fn new_book(author: &str, title: &str) -> NewBook {
        NewBook {
            author: author.to_string(),
            title: title.to_string(),
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_user_insert_assigns_ids_and_finds_by_email() {
        let store = InMemoryStore::new();

        let first = UserRepository::insert(&store, new_user("a@b.com"))
            .await
            .unwrap();
        let second = UserRepository::insert(&store, new_user("c@d.com"))
            .await
            .unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));

        let found = store.find_by_email("c@d.com").await.unwrap();
        assert_eq!(found, Some(second));
        assert_eq!(store.find_by_email("x@y.com").await.unwrap(), None);
        // Emails match case-sensitively
        assert_eq!(store.find_by_email("A@B.COM").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_user_insert_rejects_duplicate_email() {
        let store = InMemoryStore::new();

        UserRepository::insert(&store, new_user("a@b.com"))
            .await
            .unwrap();
        let result = UserRepository::insert(&store, new_user("a@b.com")).await;

        assert_eq!(result, Err(UserError::AlreadyExists("a@b.com".to_string())));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_same_email() {
        let store = Arc::new(InMemoryStore::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    UserRepository::insert(store.as_ref(), new_user("race@b.com")).await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert!(matches!(e, UserError::AlreadyExists(_))),
            }
        }

        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_book_crud() {
        let store = InMemoryStore::new();

        let hobbit = BookRepository::insert(&store, new_book("Tolkien", "The Hobbit"))
            .await
            .unwrap();
        let it = BookRepository::insert(&store, new_book("King", "It"))
            .await
            .unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(
            listed.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![hobbit.id, it.id]
        );

        let mut changed = hobbit.clone();
        changed.title = "The Silmarillion".to_string();
        let updated = store.update(changed).await.unwrap();
        assert_eq!(updated.title, "The Silmarillion");
        assert_eq!(updated.created_at, hobbit.created_at);

        store.delete(it.id).await.unwrap();
        assert_eq!(store.find_by_id(it.id).await.unwrap(), None);
        assert_eq!(store.delete(it.id).await, Err(BookError::NotFound(it.id)));
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let store = InMemoryStore::new();

        let first = BookRepository::insert(&store, new_book("A", "B"))
            .await
            .unwrap();
        store.delete(first.id).await.unwrap();
        let second = BookRepository::insert(&store, new_book("C", "D"))
            .await
            .unwrap();

        assert_eq!(second.id, BookId(2));
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let store = InMemoryStore::new();

        let ghost = Book {
            id: BookId(9),
            created_at: Utc::now(),
            author: "A".to_string(),
            title: "B".to_string(),
            created_by: None,
        };

        assert_eq!(store.update(ghost).await, Err(BookError::NotFound(BookId(9))));
    }

    #[tokio::test]
    async fn test_seed_and_reset() {
        let store = InMemoryStore::new();
        BookRepository::insert(&store, new_book("Old", "Row"))
            .await
            .unwrap();

        store
            .seed(
                vec![new_user("a@b.com"), new_user("c@d.com")],
                vec![NewBook {
                    author: "King".to_string(),
                    title: "The Shining".to_string(),
                    created_by: Some(UserId(2)),
                }],
            )
            .await
            .unwrap();

        let books = store.list_all().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, BookId(1));
        assert_eq!(books[0].created_by, Some(UserId(2)));
        assert!(store.find_by_email("c@d.com").await.unwrap().is_some());

        store.reset().await;
        assert!(store.list_all().await.unwrap().is_empty());
        assert_eq!(store.find_by_email("a@b.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_seed_rejects_duplicate_users() {
        let store = InMemoryStore::new();

        let result = store
            .seed(vec![new_user("a@b.com"), new_user("a@b.com")], vec![])
            .await;

        assert!(matches!(result, Err(UserError::AlreadyExists(_))));
    }
}
