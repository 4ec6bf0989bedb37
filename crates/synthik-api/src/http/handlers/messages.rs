//! Message history HTTP handler.
//!
//! GET /api/chats/{id}/messages - List a chat's messages in order.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use synthik_types::chat::ChatMessage;
use synthik_types::llm::Role;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::handlers::chats::parse_chat_id;
use crate::state::AppState;

/// Wire shape of a message in history responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            role: message.role,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

/// GET /api/chats/{id}/messages - The caller's view of a chat's history.
///
/// A chat that does not exist and a chat owned by someone else both
/// produce the same 404.
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    let chat_id = parse_chat_id(&chat_id)?;

    let messages = state.chats.messages_for_owner(&chat_id, &user_id).await?;

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_is_camel_case() {
        let response = MessageResponse::from(ChatMessage {
            id: Uuid::now_v7(),
            chat_id: Uuid::now_v7(),
            role: Role::Assistant,
            content: "Hello!".to_string(),
            created_at: Utc::now(),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["role"], "assistant");
        assert!(value.get("createdAt").is_some());
        // chat_id is implicit in the route, not repeated per message
        assert!(value.get("chatId").is_none());
    }
}
