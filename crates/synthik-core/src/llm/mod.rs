//! Completion backend abstractions.
//!
//! - `CompletionClient`: trait for streaming completion backends
//! - `BoxCompletionClient`: object-safe wrapper for dynamic dispatch
//! - `prompt`: the fixed persona and sampling parameters every turn carries

pub mod client;
pub mod prompt;

pub use client::{BoxCompletionClient, CompletionClient, CompletionStream};
