//! Chat persistence abstractions and the service orchestrating them.
//!
//! `ChatStore` is the trait the infrastructure layer implements;
//! `ChatService` layers ownership checks and turn recording on top of it.

pub mod service;
pub mod store;

pub use service::ChatService;
pub use store::ChatStore;
