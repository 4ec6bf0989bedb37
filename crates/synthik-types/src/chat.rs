//! Chat and message domain types.
//!
//! A chat belongs to exactly one user (identified by the opaque `user_id`
//! string the identity service resolves) and orders its messages by
//! `created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export Role from the llm module (a stored message role and a submitted
// turn role are the same closed set).
pub use crate::llm::Role;

/// Title given to a chat created without one (or with an empty one).
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// A conversation owned by a single user.
///
/// `updated_at` is bumped whenever an assistant reply lands, so listing by
/// `updated_at` descending shows the most recently active chat first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single persisted message within a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
