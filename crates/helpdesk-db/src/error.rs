//! Database-specific error types and conversions.

use helpdesk_core::error::HelpdeskError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Stored record could not be decoded: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },
}

impl From<DbError> for HelpdeskError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => HelpdeskError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => HelpdeskError::AlreadyExists { entity },
            other => HelpdeskError::Database(other.to_string()),
        }
    }
}
