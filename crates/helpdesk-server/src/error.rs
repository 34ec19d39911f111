//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use helpdesk_core::error::HelpdeskError;
use serde_json::json;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper turning domain errors into HTTP responses.
///
/// Store and internal failures get a generic message; the underlying
/// error is logged, never serialized.
#[derive(Debug)]
pub struct ApiError(pub HelpdeskError);

impl From<HelpdeskError> for ApiError {
    fn from(err: HelpdeskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HelpdeskError::Validation { message } => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            HelpdeskError::AlreadyExists { entity } => {
                (StatusCode::BAD_REQUEST, format!("{entity} already exists"))
            }
            HelpdeskError::AuthenticationFailed { reason } => {
                (StatusCode::UNAUTHORIZED, reason.clone())
            }
            HelpdeskError::AuthorizationDenied { reason } => {
                (StatusCode::FORBIDDEN, reason.clone())
            }
            HelpdeskError::NotFound { entity, .. } => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            HelpdeskError::Upstream { message, .. } => {
                error!(error = %message, "Upstream service failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Assistant service is unavailable".to_string(),
                )
            }
            HelpdeskError::Database(detail) => {
                error!(error = %detail, "Database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            HelpdeskError::Internal(detail) => {
                error!(error = %detail, "Internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl ApiError {
    /// Credential-check failures on signin surface as 400 with a
    /// uniform message, so the response does not reveal whether the
    /// email exists.
    pub fn invalid_credentials(err: HelpdeskError) -> ApiError {
        match err {
            HelpdeskError::AuthenticationFailed { .. } | HelpdeskError::NotFound { .. } => {
                ApiError(HelpdeskError::validation("Invalid email or password"))
            }
            other => ApiError(other),
        }
    }
}
