//! HTTP/REST API layer for synthik.
//!
//! Axum-based REST API at `/api/` with session-token authentication,
//! SSE chat streaming, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
