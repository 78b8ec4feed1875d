//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user repository using Diesel ORM
//! - **action_log**: tracing-backed sink for fire-and-forget action messages
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod action_log;
pub mod persistence;
