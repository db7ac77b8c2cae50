use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::book_id;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<()>, ApiError> {
    let id = book_id(path)?;

    state.book_service.delete_book(id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, ()))
}
