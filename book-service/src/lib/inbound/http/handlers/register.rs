use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .register_user(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    age: i64,
}

impl From<RegisterRequestBody> for RegisterUserCommand {
    fn from(body: RegisterRequestBody) -> Self {
        RegisterUserCommand::new(
            body.email,
            body.password,
            body.first_name,
            body.last_name,
            body.age,
        )
    }
}

/// Stored user as returned to the client.
///
/// `password` carries the Argon2 hash, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl From<&User> for RegisterResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            created_at: user.created_at,
            email: user.email.clone(),
            password: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            age: user.age,
        }
    }
}
