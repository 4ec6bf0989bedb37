//! ChatStore trait definition.
//!
//! Persistence operations for chats and their messages. Uses native async
//! fn in traits (RPITIT, Rust 2024 edition); the implementation lives in
//! synthik-infra (`SqliteChatStore`).

use chrono::{DateTime, Utc};
use synthik_types::chat::{Chat, ChatMessage};
use synthik_types::error::RepositoryError;
use uuid::Uuid;

/// Store trait for chat and message persistence.
pub trait ChatStore: Send + Sync {
    /// Insert a new chat.
    fn create_chat(
        &self,
        chat: &Chat,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Get a chat by its unique ID.
    fn get_chat(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Chat>, RepositoryError>> + Send;

    /// List a user's chats, ordered by updated_at DESC.
    fn list_chats(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Delete a chat and its messages in one transaction.
    ///
    /// Returns `RepositoryError::NotFound` when the chat does not exist;
    /// in that case nothing is deleted.
    fn delete_chat(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Set a chat's updated_at timestamp.
    fn touch_chat(
        &self,
        chat_id: &Uuid,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a new message.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a chat's messages, ordered by created_at ASC.
    fn get_messages(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Count the messages in a chat.
    fn count_messages(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
