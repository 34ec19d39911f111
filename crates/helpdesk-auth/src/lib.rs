//! Helpdesk Auth — password hashing and verification, session-token
//! issuance/validation, and the signup/signin flows.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, SessionIdentity, SignInOutput, SignUpInput, resolve_session};
pub use token::SessionTokenClaims;
