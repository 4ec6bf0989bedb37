//! SQLite chat store implementation.
//!
//! Implements `ChatStore` from `synthik-core` using sqlx with split read/write
//! pools: raw queries, private Row structs, reads on the reader pool, writes on
//! the single-connection writer pool.

use chrono::{DateTime, Utc};
use sqlx::Row;
use synthik_core::chat::store::ChatStore;
use synthik_types::chat::{Chat, ChatMessage};
use synthik_types::error::RepositoryError;
use synthik_types::llm::Role;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatStore`.
pub struct SqliteChatStore {
    pool: DatabasePool,
}

impl SqliteChatStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Chat.
struct ChatRow {
    id: String,
    user_id: String,
    title: String,
    created_at: String,
    updated_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Chat {
            id,
            user_id: self.user_id,
            title: self.title,
            created_at,
            updated_at,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct MessageRow {
    id: String,
    chat_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let chat_id = Uuid::parse_str(&self.chat_id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat_id: {e}")))?;
        let role: Role = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatMessage {
            id,
            chat_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// ChatStore implementation
// ---------------------------------------------------------------------------

impl ChatStore for SqliteChatStore {
    async fn create_chat(&self, chat: &Chat) -> Result<Chat, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chats (id, user_id, title, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(chat.id.to_string())
        .bind(&chat.user_id)
        .bind(&chat.title)
        .bind(format_datetime(&chat.created_at))
        .bind(format_datetime(&chat.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(chat.clone())
    }

    async fn get_chat(&self, chat_id: &Uuid) -> Result<Option<Chat>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chats WHERE id = ?")
            .bind(chat_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chat_row =
                    ChatRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(chat_row.into_chat()?))
            }
            None => Ok(None),
        }
    }

    async fn list_chats(&self, user_id: &str) -> Result<Vec<Chat>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chats WHERE user_id = ? ORDER BY updated_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut chats = Vec::with_capacity(rows.len());
        for row in &rows {
            let chat_row =
                ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            chats.push(chat_row.into_chat()?);
        }

        Ok(chats)
    }

    async fn delete_chat(&self, chat_id: &Uuid) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("DELETE FROM messages WHERE chat_id = ?")
            .bind(chat_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(chat_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            // Dropping the open transaction rolls back the message delete.
            return Err(RepositoryError::NotFound);
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn touch_chat(&self, chat_id: &Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE chats SET updated_at = ? WHERE id = ?")
            .bind(format_datetime(&at))
            .bind(chat_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages (id, chat_id, role, content, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.chat_id.to_string())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(&self, chat_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM messages WHERE chat_id = ? ORDER BY created_at ASC")
                .bind(chat_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn count_messages(&self, chat_id: &Uuid) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM messages WHERE chat_id = ?")
            .bind(chat_id.to_string())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use chrono::Duration;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_chat(user_id: &str) -> Chat {
        let now = Utc::now();
        Chat {
            id: Uuid::now_v7(),
            user_id: user_id.to_string(),
            title: "New Chat".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn make_message(chat_id: Uuid, role: Role, content: &str) -> ChatMessage {
        ChatMessage {
            id: Uuid::now_v7(),
            chat_id,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_chat() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        let chat = make_chat("user_1");
        let created = store.create_chat(&chat).await.unwrap();
        assert_eq!(created.id, chat.id);

        let found = store.get_chat(&chat.id).await.unwrap().unwrap();
        assert_eq!(found.id, chat.id);
        assert_eq!(found.user_id, "user_1");
        assert_eq!(found.title, "New Chat");
        assert_eq!(found.created_at.to_rfc3339(), chat.created_at.to_rfc3339());
    }

    #[tokio::test]
    async fn test_get_missing_chat_returns_none() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        let found = store.get_chat(&Uuid::now_v7()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_chats_scoped_and_ordered() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        let base = Utc::now();

        let mut oldest = make_chat("user_1");
        oldest.updated_at = base;
        let mut newest = make_chat("user_1");
        newest.updated_at = base + Duration::seconds(20);
        let mut middle = make_chat("user_1");
        middle.updated_at = base + Duration::seconds(10);
        let foreign = make_chat("user_2");

        store.create_chat(&oldest).await.unwrap();
        store.create_chat(&newest).await.unwrap();
        store.create_chat(&middle).await.unwrap();
        store.create_chat(&foreign).await.unwrap();

        let chats = store.list_chats("user_1").await.unwrap();
        assert_eq!(chats.len(), 3);
        assert_eq!(chats[0].id, newest.id);
        assert_eq!(chats[1].id, middle.id);
        assert_eq!(chats[2].id, oldest.id);
    }

    #[tokio::test]
    async fn test_touch_chat_bumps_updated_at() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        let chat = make_chat("user_1");
        store.create_chat(&chat).await.unwrap();

        let later = chat.updated_at + Duration::seconds(30);
        store.touch_chat(&chat.id, later).await.unwrap();

        let found = store.get_chat(&chat.id).await.unwrap().unwrap();
        assert_eq!(found.updated_at.to_rfc3339(), later.to_rfc3339());
        // created_at is untouched
        assert_eq!(found.created_at.to_rfc3339(), chat.created_at.to_rfc3339());
    }

    #[tokio::test]
    async fn test_touch_missing_chat_not_found() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        let result = store.touch_chat(&Uuid::now_v7(), Utc::now()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_chat_removes_messages() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        let chat = make_chat("user_1");
        store.create_chat(&chat).await.unwrap();
        store
            .save_message(&make_message(chat.id, Role::User, "Hello"))
            .await
            .unwrap();
        store
            .save_message(&make_message(chat.id, Role::Assistant, "Hi there!"))
            .await
            .unwrap();

        store.delete_chat(&chat.id).await.unwrap();

        let found = store.get_chat(&chat.id).await.unwrap();
        assert!(found.is_none());

        let count = store.count_messages(&chat.id).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_chat_not_found() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        let result = store.delete_chat(&Uuid::now_v7()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_save_and_get_messages_ordered() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        let chat = make_chat("user_1");
        store.create_chat(&chat).await.unwrap();

        let base = Utc::now();
        let mut first = make_message(chat.id, Role::User, "What is Rust?");
        first.created_at = base;
        let mut second = make_message(chat.id, Role::Assistant, "A systems language.");
        second.created_at = base + Duration::seconds(1);

        // Insert out of order; reads sort by created_at
        store.save_message(&second).await.unwrap();
        store.save_message(&first).await.unwrap();

        let messages = store.get_messages(&chat.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, first.id);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].id, second.id);
        assert_eq!(messages[1].role, Role::Assistant);

        let count = store.count_messages(&chat.id).await.unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_message_requires_existing_chat() {
        let pool = test_pool().await;
        let store = SqliteChatStore::new(pool.clone());

        // Foreign keys are enforced, so an orphan message is rejected
        let result = store
            .save_message(&make_message(Uuid::now_v7(), Role::User, "orphan"))
            .await;
        assert!(matches!(result, Err(RepositoryError::Query(_))));
    }
}
