//! Chat lifecycle HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/chats             - List the caller's chats
//! - POST   /api/chats             - Create a chat
//! - DELETE /api/chats?chatId=...  - Delete a chat and its messages

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use synthik_types::chat::Chat;
use synthik_types::error::ChatError;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::payload::{Json, Query};
use crate::state::AppState;

/// Wire shape of a chat in the list response. The owner is the caller, so
/// the user id is not repeated per row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Chat> for ChatSummary {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            title: chat.title,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        }
    }
}

/// Wire shape of the created chat: the full row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            user_id: chat.user_id,
            title: chat.title,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        }
    }
}

/// Request body for chat creation.
#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub title: Option<String>,
}

/// Query parameters for chat deletion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChatQuery {
    pub chat_id: Option<String>,
}

/// Parse a chat id from its string form.
///
/// An unparseable id reads the same as an absent chat, so the response
/// never reveals whether the id was close to a real one.
pub(crate) fn parse_chat_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::NotFound("Chat not found".to_string()))
}

/// GET /api/chats - List the caller's chats, most recently active first.
pub async fn list_chats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ChatSummary>>, AppError> {
    let chats = state.chats.list_chats(&user_id).await?;

    Ok(Json(chats.into_iter().map(ChatSummary::from).collect()))
}

/// POST /api/chats - Create a chat owned by the caller.
pub async fn create_chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let chat = state.chats.create_chat(&user_id, body.title).await?;

    Ok(Json(ChatResponse::from(chat)))
}

/// Map a delete failure; this route's 403 payload says just "Unauthorized".
fn delete_error(e: ChatError) -> AppError {
    match e {
        ChatError::Forbidden => AppError::Forbidden("Unauthorized".to_string()),
        other => AppError::from(other),
    }
}

/// DELETE /api/chats?chatId=... - Delete a chat and all its messages.
pub async fn delete_chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<DeleteChatQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let chat_id = match query.chat_id.as_deref() {
        Some(id) if !id.is_empty() => parse_chat_id(id)?,
        _ => return Err(AppError::BadRequest("Chat ID required".to_string())),
    };

    state
        .chats
        .delete_chat(&chat_id, &user_id)
        .await
        .map_err(delete_error)?;

    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_chat() -> Chat {
        let now = Utc::now();
        Chat {
            id: Uuid::now_v7(),
            user_id: "user_1".to_string(),
            title: "New Chat".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_chat_response_is_camel_case() {
        let value = serde_json::to_value(ChatResponse::from(make_chat())).unwrap();
        assert!(value.get("userId").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("user_id").is_none());
        assert_eq!(value["title"], "New Chat");
    }

    #[test]
    fn test_chat_summary_omits_user_id() {
        let value = serde_json::to_value(ChatSummary::from(make_chat())).unwrap();
        assert!(value.get("id").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("userId").is_none());
    }

    #[test]
    fn test_delete_query_accepts_camel_case() {
        let query: DeleteChatQuery =
            serde_json::from_str(r#"{"chatId": "0192d0c0-0000-7000-8000-000000000000"}"#).unwrap();
        assert!(query.chat_id.is_some());

        let empty: DeleteChatQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.chat_id.is_none());
    }

    #[test]
    fn test_parse_chat_id_rejects_garbage_as_not_found() {
        assert!(matches!(
            parse_chat_id("not-a-uuid"),
            Err(AppError::NotFound(_))
        ));
        assert!(parse_chat_id("0192d0c0-0000-7000-8000-000000000000").is_ok());
    }

    #[test]
    fn test_delete_forbidden_reads_unauthorized() {
        // The delete route's 403 carries a shorter message than the turn
        // route's
        match delete_error(ChatError::Forbidden) {
            AppError::Forbidden(message) => assert_eq!(message, "Unauthorized"),
            _ => panic!("forbidden must stay forbidden"),
        }
        assert!(matches!(
            delete_error(ChatError::NotFound),
            AppError::NotFound(_)
        ));
    }
}
