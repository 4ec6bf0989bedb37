//! Shared domain types for synthik.
//!
//! This crate contains the core domain types used across the synthik server:
//! chats, messages, completion requests/events, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
