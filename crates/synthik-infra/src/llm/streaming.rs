//! OpenAI SSE stream to [`CompletionEvent`] adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] chunks to the
//! backend-agnostic [`CompletionEvent`] enum defined in `synthik-types`.

use async_openai::types::chat::ChatCompletionResponseStream;
use futures_util::StreamExt;

use synthik_core::llm::client::CompletionStream;
use synthik_types::llm::{CompletionError, CompletionEvent};

/// Map an async-openai [`ChatCompletionResponseStream`] to a [`CompletionStream`].
///
/// The returned stream yields one [`CompletionEvent::Delta`] per non-empty
/// text chunk and a final [`CompletionEvent::Done`] when the upstream stream
/// ends. Mid-stream failures surface as [`CompletionError::Stream`] and
/// terminate the stream.
pub fn map_chat_stream(stream: ChatCompletionResponseStream) -> CompletionStream {
    Box::pin(async_stream::try_stream! {
        let mut stream = stream;

        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| CompletionError::Stream(e.to_string()))?;

            // Typically a single choice per chunk
            for choice in &chunk.choices {
                if let Some(ref text) = choice.delta.content {
                    if !text.is_empty() {
                        yield CompletionEvent::Delta { text: text.clone() };
                    }
                }
            }
        }

        yield CompletionEvent::Done;
    })
}
