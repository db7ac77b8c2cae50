use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

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

/// PostgreSQL storage backend for users and books
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: UserId(row.try_get("id")?),
        created_at: row.try_get("created_at")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        age: row.try_get("age")?,
    })
}

fn book_from_row(row: &PgRow) -> Result<Book, sqlx::Error> {
    let created_by: Option<i64> = row.try_get("created_by")?;

    Ok(Book {
        id: BookId(row.try_get("id")?),
        created_at: row.try_get("created_at")?,
        author: row.try_get("author")?,
        title: row.try_get("title")?,
        created_by: created_by.map(UserId),
    })
}

fn user_db_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

fn book_db_error(e: sqlx::Error) -> BookError {
    BookError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, age)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, email, password_hash, first_name, last_name, age
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::AlreadyExists(user.email.clone());
                }
            }
            user_db_error(e)
        })?;

        user_from_row(&row).map_err(user_db_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, created_at, email, password_hash, first_name, last_name, age
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(user_db_error)?;

        row.as_ref()
            .map(user_from_row)
            .transpose()
            .map_err(user_db_error)
    }
}

#[async_trait]
impl BookRepository for PostgresStore {
    async fn insert(&self, book: NewBook) -> Result<Book, BookError> {
        let row = sqlx::query(
            r#"
            INSERT INTO books (author, title, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, created_at, author, title, created_by
            "#,
        )
        .bind(&book.author)
        .bind(&book.title)
        .bind(book.created_by.map(|id| id.0))
        .fetch_one(&self.pool)
        .await
        .map_err(book_db_error)?;

        book_from_row(&row).map_err(book_db_error)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(
            r#"
            SELECT id, created_at, author, title, created_by
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(book_db_error)?;

        row.as_ref()
            .map(book_from_row)
            .transpose()
            .map_err(book_db_error)
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query(
            r#"
            SELECT id, created_at, author, title, created_by
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(book_db_error)?;

        rows.iter()
            .map(book_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(book_db_error)
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let row = sqlx::query(
            r#"
            UPDATE books
            SET author = $2, title = $3
            WHERE id = $1
            RETURNING id, created_at, author, title, created_by
            "#,
        )
        .bind(book.id.0)
        .bind(&book.author)
        .bind(&book.title)
        .fetch_optional(&self.pool)
        .await
        .map_err(book_db_error)?
        .ok_or(BookError::NotFound(book.id))?;

        book_from_row(&row).map_err(book_db_error)
    }

    async fn delete(&self, id: BookId) -> Result<(), BookError> {
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(book_db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id));
        }

        Ok(())
    }
}
