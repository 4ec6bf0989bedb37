//! Business logic and trait definitions for synthik.
//!
//! This crate defines the "ports" (store, completion client, identity
//! verifier) that the infrastructure layer implements. It depends only on
//! `synthik-types` -- never on `synthik-infra` or any database/IO crate.

pub mod chat;
pub mod identity;
pub mod llm;
