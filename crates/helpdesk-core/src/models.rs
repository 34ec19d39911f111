//! Domain models for the helpdesk.
//!
//! These are the core types shared across all crates.

pub mod ticket;
pub mod user;
