//! Infrastructure layer for synthik.
//!
//! Contains implementations of the traits defined in `synthik-core`:
//! SQLite storage, the OpenAI-compatible streaming completion client, and
//! the HTTP identity verifier.

pub mod identity;
pub mod llm;
pub mod sqlite;
