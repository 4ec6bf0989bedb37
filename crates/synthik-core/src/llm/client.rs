//! CompletionClient trait and its object-safe wrapper.
//!
//! Opening the stream is an async operation that performs the HTTP request,
//! so connection failures surface as an `Err` before any response bytes are
//! written -- that is what lets the HTTP layer answer 503 instead of
//! breaking mid-stream.

use std::future::Future;
use std::pin::Pin;

use futures_util::Stream;

use synthik_types::llm::{CompletionError, CompletionEvent, CompletionRequest};

/// A live stream of completion events from the model.
pub type CompletionStream =
    Pin<Box<dyn Stream<Item = Result<CompletionEvent, CompletionError>> + Send + 'static>>;

/// Trait for streaming completion backends (Ollama and other
/// OpenAI-compatible endpoints).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The
/// implementation lives in synthik-infra (`OpenAiCompatClient`).
pub trait CompletionClient: Send + Sync {
    /// Human-readable backend name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send the request and open the response stream.
    fn open_stream(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<CompletionStream, CompletionError>> + Send;
}

/// Object-safe version of [`CompletionClient`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch
/// (`dyn CompletionClientDyn`). A blanket implementation is provided for
/// all types implementing `CompletionClient`.
pub trait CompletionClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn open_stream_boxed(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionStream, CompletionError>> + Send + '_>>;
}

/// Blanket implementation: any `CompletionClient` automatically implements
/// `CompletionClientDyn`.
impl<T: CompletionClient> CompletionClientDyn for T {
    fn name(&self) -> &str {
        CompletionClient::name(self)
    }

    fn open_stream_boxed(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionStream, CompletionError>> + Send + '_>> {
        Box::pin(self.open_stream(request))
    }
}

/// Type-erased completion client.
///
/// Since `CompletionClient` uses RPITIT, it cannot be used as a trait
/// object directly. `BoxCompletionClient` wraps any implementation behind
/// dynamic dispatch so application state (and test doubles) need no
/// generics.
pub struct BoxCompletionClient {
    inner: Box<dyn CompletionClientDyn + Send + Sync>,
}

impl BoxCompletionClient {
    /// Wrap a concrete `CompletionClient` in a type-erased box.
    pub fn new<T: CompletionClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    /// Human-readable backend name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send the request and open the response stream.
    pub async fn open_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, CompletionError> {
        self.inner.open_stream_boxed(request).await
    }
}
