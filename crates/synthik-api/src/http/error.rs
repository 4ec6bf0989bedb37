//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Every variant renders as `{"error": "<message>"}`. The 503 and 500
//! responses carry fixed client-facing messages; the underlying detail is
//! logged, never sent to the client.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use synthik_types::error::{ChatError, IdentityError};
use synthik_types::llm::CompletionError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid session token.
    Unauthorized,
    /// Malformed request input.
    BadRequest(String),
    /// Resource does not exist (or must not be revealed to the caller).
    NotFound(String),
    /// Resource exists but belongs to another user.
    Forbidden(String),
    /// The completion backend cannot be reached.
    ServiceUnavailable(String),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::NotFound => AppError::NotFound("Chat not found".to_string()),
            ChatError::Forbidden => AppError::Forbidden("Unauthorized access to chat".to_string()),
            ChatError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Unreachable(detail) => AppError::ServiceUnavailable(detail),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(e: IdentityError) -> Self {
        AppError::Internal(e.to_string())
    }
}

// Extractor rejections are caller errors; the serde detail goes into the
// envelope as-is.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ServiceUnavailable(detail) => {
                warn!(detail = %detail, "completion backend unreachable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "AI service unavailable. Please ensure Ollama is running.".to_string(),
                )
            }
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthik_types::error::RepositoryError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_shape() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_unavailable_hides_detail() {
        let response =
            AppError::ServiceUnavailable("tcp connect error: 127.0.0.1:11434".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "AI service unavailable. Please ensure Ollama is running."
        );
    }

    #[tokio::test]
    async fn test_internal_hides_detail() {
        let response = AppError::Internal("db connection lost".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_chat_error_mapping() {
        let response = AppError::from(ChatError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Chat not found");

        let response = AppError::from(ChatError::Forbidden).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Unauthorized access to chat");

        let repo = ChatError::Repository(RepositoryError::Query("locked".to_string()));
        assert!(matches!(AppError::from(repo), AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_completion_error_mapping() {
        let unreachable = AppError::from(CompletionError::Unreachable("refused".to_string()));
        assert!(matches!(unreachable, AppError::ServiceUnavailable(_)));

        let rejected = AppError::from(CompletionError::Rejected("bad model".to_string()));
        assert!(matches!(rejected, AppError::Internal(_)));
    }
}
