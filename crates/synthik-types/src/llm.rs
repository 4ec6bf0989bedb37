//! Completion request and streaming event types.
//!
//! These types model the interaction with an OpenAI-compatible completion
//! endpoint: the turn list sent upstream, the incremental events received
//! back, and the error taxonomy for the connection and the stream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role of a conversation turn.
///
/// Closed set: the messages table carries the matching CHECK constraint
/// `CHECK (role IN ('user', 'assistant'))`. The system persona is not a
/// turn; it travels in [`CompletionRequest::system`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single turn in a conversation, as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Request to the completion endpoint.
///
/// The turn list is forwarded verbatim; the server never reorders, merges,
/// or drops entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub turns: Vec<Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub max_tokens: u32,
}

/// Incremental event from a streaming completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompletionEvent {
    /// A chunk of generated text.
    Delta { text: String },
    /// The stream finished normally.
    Done,
}

/// Errors from the completion endpoint.
///
/// `Unreachable` is the 503 path: the endpoint could not be reached at all
/// (connection refused, timeout, dead host). Everything else surfaces as an
/// internal error or, mid-stream, as an SSE `error` event.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("completion endpoint rejected the request: {0}")]
    Rejected(String),

    #[error("completion stream failed: {0}")]
    Stream(String),

    #[error("invalid completion request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_role_rejects_unknown() {
        let err = "system".parse::<Role>().unwrap_err();
        assert!(err.contains("invalid message role"));
        assert!("tool".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
        assert!(serde_json::from_str::<Role>("\"system\"").is_err());
    }

    #[test]
    fn test_completion_event_tagged_serde() {
        let delta = CompletionEvent::Delta {
            text: "hi".to_string(),
        };
        let json = serde_json::to_value(&delta).unwrap();
        assert_eq!(json["type"], "delta");
        assert_eq!(json["text"], "hi");

        let done: CompletionEvent = serde_json::from_str("{\"type\":\"done\"}").unwrap();
        assert_eq!(done, CompletionEvent::Done);
    }
}
