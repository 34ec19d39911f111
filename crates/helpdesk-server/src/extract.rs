//! Request authentication extractor.

use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::extract::FromRequestParts;
use helpdesk_auth::{SessionIdentity, resolve_session};
use helpdesk_core::error::HelpdeskError;
use helpdesk_tickets::Actor;
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

/// The verified session behind the request's bearer token.
///
/// Extraction fails with 401 when the header is missing, malformed,
/// or carries an invalid or expired token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionIdentity);

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.0.user_id, self.0.role)
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

impl<C: Connection> FromRequestParts<AppState<C>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            ApiError(HelpdeskError::AuthenticationFailed {
                reason: "Missing bearer token".into(),
            })
        })?;

        let identity = resolve_session(token, &state.auth_config)?;
        Ok(AuthUser(identity))
    }
}
