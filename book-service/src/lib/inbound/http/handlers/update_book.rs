use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::book_id;
use super::create_book::BookRequestBody;
use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::models::UpdateBookCommand;
use crate::inbound::http::router::AppState;

pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<BookRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let id = book_id(path)?;
    let Json(body) = body?;

    state
        .book_service
        .update_book(id, UpdateBookCommand::new(body.author, body.title))
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
