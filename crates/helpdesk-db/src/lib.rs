//! Helpdesk Database — SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - Connection setup ([`DbConfig`], [`connect`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Repository implementations for the `helpdesk-core` traits
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, connect};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
