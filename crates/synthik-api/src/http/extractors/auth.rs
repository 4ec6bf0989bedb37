//! Session token authentication extractor.
//!
//! Extracts the session token from:
//! - `Authorization: Bearer <token>` header
//! - `X-Session-Token: <token>` header
//!
//! and resolves it to a user id through the identity service. An absent,
//! malformed, or rejected token is a 401; an unreachable identity service
//! is a 500.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated user id. Extracting this verifies the session token.
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(parts)?;

        match state.identity.verify(&token).await {
            Ok(Some(user_id)) => Ok(AuthUser(user_id)),
            Ok(None) => Err(AppError::Unauthorized),
            Err(e) => Err(AppError::from(e)),
        }
    }
}

/// Extract the session token from request headers.
fn extract_session_token(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <token>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| AppError::Unauthorized)?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    // Try X-Session-Token header
    if let Some(token) = parts.headers.get("x-session-token") {
        let token_str = token.to_str().map_err(|_| AppError::Unauthorized)?;
        return Ok(token_str.trim().to_string());
    }

    Err(AppError::Unauthorized)
}
