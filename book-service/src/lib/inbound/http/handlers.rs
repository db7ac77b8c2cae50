use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::user::errors::UserError;

pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod login;
pub mod register;
pub mod update_book;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Client-facing failure.
///
/// `InternalServerError` carries detail for the server log only; the client
/// always receives a generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    RequestTimeout(String),
}

pub const UNAUTHORIZED: &str = "unauthorized";
pub const EXPIRED_TOKEN: &str = "expired token";
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
pub const USER_ALREADY_EXISTS: &str = "user already exists";
pub const NOT_FOUND: &str = "not found";
pub const INVALID_BOOK_ID: &str = "invalid book id";
pub const REQUEST_TIMEOUT: &str = "request timed out";
pub const INTERNAL_SERVER_ERROR: &str = "internal server error";

impl ApiError {
    pub fn invalid_body(rule: impl std::fmt::Display) -> Self {
        ApiError::BadRequest(format!("invalid request body: {}", rule))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::RequestTimeout(msg) => (StatusCode::REQUEST_TIMEOUT, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            e if e.is_validation() => ApiError::invalid_body(e),
            UserError::AlreadyExists(_) => ApiError::BadRequest(USER_ALREADY_EXISTS.to_string()),
            UserError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            UserError::ExpiredToken => ApiError::Unauthorized(EXPIRED_TOKEN.to_string()),
            UserError::InvalidToken => ApiError::Unauthorized(UNAUTHORIZED.to_string()),
            e => ApiError::InternalServerError(e.to_string()),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::InvalidId => ApiError::BadRequest(INVALID_BOOK_ID.to_string()),
            e if e.is_validation() => ApiError::invalid_body(e),
            BookError::NotFound(_) => ApiError::NotFound(NOT_FOUND.to_string()),
            e => ApiError::InternalServerError(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest("invalid request body".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected path parameter");
        ApiError::BadRequest(INVALID_BOOK_ID.to_string())
    }
}

/// Unwrap a numeric book id path segment.
pub fn book_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = path?;
    Ok(id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Book as returned by every book endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub title: String,
    pub created_by: Option<i64>,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.0,
            created_at: book.created_at,
            author: book.author.clone(),
            title: book.title.clone(),
            created_by: book.created_by.map(|id| id.0),
        }
    }
}
