use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::models::CreateBookCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Add a book, recording the authenticated caller as its creator.
pub async fn create_book(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: Result<Json<BookRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let Json(body) = body?;

    state
        .book_service
        .add_book(CreateBookCommand::new(
            body.author,
            body.title,
            Some(caller.user_id),
        ))
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}

/// HTTP request body for adding or updating a book.
///
/// Missing fields deserialize as empty strings so the domain rules report them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRequestBody {
    #[serde(default)]
    pub(super) author: String,
    #[serde(default)]
    pub(super) title: String,
}
