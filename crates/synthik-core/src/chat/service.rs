//! Chat service orchestrating ownership checks and turn recording.
//!
//! All operations are scoped to the authenticated user's id: handlers never
//! touch the store directly, so every read and write goes through the
//! ownership checks here.

use chrono::Utc;
use synthik_types::chat::{Chat, ChatMessage, DEFAULT_CHAT_TITLE, Role};
use synthik_types::error::ChatError;
use tracing::info;
use uuid::Uuid;

use crate::chat::store::ChatStore;

/// Orchestrates chat lifecycle and message persistence.
///
/// Generic over `ChatStore` to maintain clean architecture (synthik-core
/// never depends on synthik-infra).
pub struct ChatService<S: ChatStore> {
    store: S,
}

impl<S: ChatStore> ChatService<S> {
    /// Create a new chat service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // --- Chat lifecycle ---

    /// List the user's chats, most recently active first.
    pub async fn list_chats(&self, user_id: &str) -> Result<Vec<Chat>, ChatError> {
        Ok(self.store.list_chats(user_id).await?)
    }

    /// Create a chat for the user.
    ///
    /// A missing or empty title becomes [`DEFAULT_CHAT_TITLE`].
    pub async fn create_chat(
        &self,
        user_id: &str,
        title: Option<String>,
    ) -> Result<Chat, ChatError> {
        let now = Utc::now();
        let chat = Chat {
            id: Uuid::now_v7(),
            user_id: user_id.to_string(),
            title: title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_CHAT_TITLE.to_string()),
            created_at: now,
            updated_at: now,
        };

        let created = self.store.create_chat(&chat).await?;
        info!(chat_id = %created.id, user_id = %created.user_id, "chat created");
        Ok(created)
    }

    /// Delete the user's chat, messages included.
    ///
    /// A missing chat is `NotFound`, a foreign one `Forbidden`; either way
    /// nothing is deleted.
    pub async fn delete_chat(&self, chat_id: &Uuid, user_id: &str) -> Result<(), ChatError> {
        self.authorize_chat(chat_id, user_id).await?;
        self.store.delete_chat(chat_id).await?;
        info!(chat_id = %chat_id, "chat deleted");
        Ok(())
    }

    /// Load a chat and check that the caller owns it.
    ///
    /// Distinguishes a missing chat (`NotFound`) from a foreign one
    /// (`Forbidden`). The turn and delete routes surface that distinction;
    /// the history route uses [`Self::messages_for_owner`] instead.
    pub async fn authorize_chat(&self, chat_id: &Uuid, user_id: &str) -> Result<Chat, ChatError> {
        let chat = self
            .store
            .get_chat(chat_id)
            .await?
            .ok_or(ChatError::NotFound)?;

        if chat.user_id != user_id {
            return Err(ChatError::Forbidden);
        }
        Ok(chat)
    }

    // --- Messages ---

    /// The user's view of a chat's messages, ordered by creation time.
    ///
    /// One combined existence-and-ownership check: a missing chat and a
    /// foreign chat both come back `NotFound`, so this path never reveals
    /// that someone else's chat exists.
    pub async fn messages_for_owner(
        &self,
        chat_id: &Uuid,
        user_id: &str,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        match self.store.get_chat(chat_id).await? {
            Some(chat) if chat.user_id == user_id => Ok(self.store.get_messages(chat_id).await?),
            _ => Err(ChatError::NotFound),
        }
    }

    /// Persist a caller's turn with role `user`.
    pub async fn record_user_turn(
        &self,
        chat_id: Uuid,
        content: String,
    ) -> Result<ChatMessage, ChatError> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            chat_id,
            role: Role::User,
            content,
            created_at: Utc::now(),
        };

        self.store.save_message(&message).await?;
        Ok(message)
    }

    /// Persist a completed assistant reply and bump the chat's updated_at.
    pub async fn record_assistant_turn(
        &self,
        chat_id: Uuid,
        content: String,
    ) -> Result<ChatMessage, ChatError> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            chat_id,
            role: Role::Assistant,
            content,
            created_at: Utc::now(),
        };

        self.store.save_message(&message).await?;
        self.store.touch_chat(&chat_id, message.created_at).await?;
        Ok(message)
    }
}
