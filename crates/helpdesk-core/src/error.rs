//! Error types for the helpdesk system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelpdeskError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Upstream service error: {message}")]
    Upstream { message: String, retryable: bool },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HelpdeskError {
    /// Shorthand for a validation failure with a human-readable message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type HelpdeskResult<T> = Result<T, HelpdeskError>;
