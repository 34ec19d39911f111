//! Helpdesk Server — HTTP surface over the auth, ticket and assist
//! services.
//!
//! All wiring happens at the composition root: one database
//! connection is established before the listener starts, and the
//! services are handed to the router through [`AppState`]. Every
//! role-gated route re-validates the session token server-side.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::app;
pub use state::AppState;
