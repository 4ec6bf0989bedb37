//! Streaming completion client backed by any OpenAI-compatible API.
//!
//! A single [`OpenAiCompatClient`] serves Ollama, OpenAI, and any other
//! endpoint speaking the OpenAI chat-completions wire format, via a
//! configurable base URL. Uses [`async_openai`] for type-safe request
//! handling and built-in SSE streaming.

pub mod client;
pub mod streaming;

pub use client::OpenAiCompatClient;
