use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::UNAUTHORIZED;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer tokens and adds the caller to request extensions.
///
/// Rejections happen before the wrapped handler runs:
/// * missing header or wrong scheme - 401 `unauthorized`, token never inspected
/// * expired token - 401 `expired token`
/// * any other invalid token - 401 `unauthorized`
///
/// A token that validates but yields no subject is an internal error.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| {
            tracing::info!(uri = %req.uri(), "Missing or malformed Authorization header");
            ApiError::Unauthorized(UNAUTHORIZED.to_string())
        })?
        .to_string();

    state.user_service.validate_token(&token).map_err(|e| {
        tracing::warn!(error = %e, uri = %req.uri(), "Bearer token rejected");
        ApiError::from(e)
    })?;

    let user_id = state.user_service.subject_id(&token).map_err(|e| {
        ApiError::InternalServerError(format!("Validated token has no usable subject: {}", e))
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Token part of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme != BEARER_SCHEME {
        return None;
    }

    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }

    Some(token)
}
