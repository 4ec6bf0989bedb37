//! SSE streaming chat turn endpoint.
//!
//! POST /api/chat
//!
//! Streams the model's reply as Server-Sent Events. The upstream completion
//! is consumed by a spawned relay task and forwarded through a channel, so
//! a client that disconnects mid-stream does not abort the run: the relay
//! keeps draining and the finished reply is still persisted.
//!
//! SSE event types:
//! - `text_delta` -- incremental text: `{ "text": "..." }`
//! - `error`      -- stream failure: `{ "message": "..." }`
//! - `done`       -- stream complete: `{}`

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;
use uuid::Uuid;

use synthik_core::chat::service::ChatService;
use synthik_core::chat::store::ChatStore;
use synthik_core::llm::client::CompletionStream;
use synthik_core::llm::prompt;
use synthik_types::llm::{CompletionEvent, Role, Turn};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::payload::Json;
use crate::http::handlers::chats::parse_chat_id;
use crate::state::AppState;

/// Request body for the streaming turn endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    /// The conversation so far; the last entry is the turn to answer.
    #[serde(default)]
    pub messages: Vec<IncomingTurn>,
    /// Chat to persist the turn into; absent for ephemeral conversations.
    pub chat_id: Option<String>,
}

/// One conversation turn in the request body.
#[derive(Debug, Deserialize)]
pub struct IncomingTurn {
    pub role: Role,
    pub content: String,
}

/// Events the relay task emits toward the SSE response.
#[derive(Debug, Clone, PartialEq)]
enum RelayEvent {
    Delta(String),
    Error(String),
    Done,
}

fn to_sse_event(event: RelayEvent) -> Result<Event, Infallible> {
    let event = match event {
        RelayEvent::Delta(text) => {
            let data = serde_json::json!({ "text": text });
            Event::default().event("text_delta").data(data.to_string())
        }
        RelayEvent::Error(message) => {
            let data = serde_json::json!({ "message": message });
            Event::default().event("error").data(data.to_string())
        }
        RelayEvent::Done => Event::default().event("done").data("{}"),
    };
    Ok(event)
}

/// POST /api/chat - Stream a model reply for the caller's conversation.
///
/// When the body names a chat, the caller must own it; the last turn's
/// content is persisted as the caller's message before the model call and
/// the assistant reply after it completes. Without a chat id (absent or
/// empty) the turn is answered but not persisted.
pub async fn stream_turn(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<TurnRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if body.messages.is_empty() {
        return Err(AppError::BadRequest("Invalid messages format".to_string()));
    }

    // Bind the turn to a chat when one is named; an empty id reads as
    // absent, a garbage id as missing
    let chat = match body.chat_id.as_deref() {
        Some(id) if !id.is_empty() => {
            let chat_id = parse_chat_id(id)?;
            Some(state.chats.authorize_chat(&chat_id, &user_id).await?)
        }
        _ => None,
    };

    // Record the last turn's content as the caller's message before the
    // model call, best effort: a storage hiccup must not block the reply.
    if let (Some(chat), Some(last)) = (chat.as_ref(), body.messages.last()) {
        if let Err(e) = state
            .chats
            .record_user_turn(chat.id, last.content.clone())
            .await
        {
            warn!(chat_id = %chat.id, error = %e, "failed to persist user turn");
        }
    }

    let turns = body
        .messages
        .into_iter()
        .map(|m| Turn {
            role: m.role,
            content: m.content,
        })
        .collect();
    let request = prompt::build_completion_request(state.model.clone(), turns);

    // Connection errors surface here as a 503, before the SSE response starts
    let upstream = state.completions.open_stream(request).await?;

    let (tx, rx) = mpsc::channel::<RelayEvent>(32);
    tokio::spawn(relay_completion(
        upstream,
        tx,
        state.chats.clone(),
        chat.map(|c| c.id),
    ));

    Ok(Sse::new(ReceiverStream::new(rx).map(to_sse_event))
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}

/// Drive the upstream completion to its end and forward events into `tx`.
///
/// Send failures are ignored: a dropped receiver only means the client went
/// away, and the stream must still be drained so the finished reply can be
/// recorded. Nothing is persisted for ephemeral turns or failed streams.
async fn relay_completion<S: ChatStore>(
    mut upstream: CompletionStream,
    tx: mpsc::Sender<RelayEvent>,
    chats: Arc<ChatService<S>>,
    chat_id: Option<Uuid>,
) {
    let mut full_response = String::new();
    let mut had_error = false;

    while let Some(event) = upstream.next().await {
        match event {
            Ok(CompletionEvent::Delta { text }) => {
                full_response.push_str(&text);
                let _ = tx.send(RelayEvent::Delta(text)).await;
            }
            Ok(CompletionEvent::Done) => break,
            Err(e) => {
                warn!(error = %e, "completion stream failed");
                let _ = tx.send(RelayEvent::Error(e.to_string())).await;
                had_error = true;
                break;
            }
        }
    }

    if !had_error {
        if let Some(chat_id) = chat_id {
            if let Err(e) = chats.record_assistant_turn(chat_id, full_response).await {
                warn!(chat_id = %chat_id, error = %e, "failed to persist assistant reply");
            }
        }
    }

    let _ = tx.send(RelayEvent::Done).await;
}
