//! Signup and signin handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use helpdesk_auth::SignUpInput;
use helpdesk_core::models::user::{PublicUser, Role};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct SignUpRequest {
    name: String,
    email: String,
    password: String,
    role: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    message: String,
}

pub(crate) async fn signup<C: Connection>(
    State(state): State<AppState<C>>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let role = Role::parse(&req.role)?;

    state
        .auth
        .sign_up(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
            role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".into(),
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignInRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignInResponse {
    message: String,
    token: String,
    user: PublicUser,
}

pub(crate) async fn signin<C: Connection>(
    State(state): State<AppState<C>>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<SignInResponse>> {
    let output = state
        .auth
        .sign_in(&req.email, &req.password)
        .await
        .map_err(ApiError::invalid_credentials)?;

    Ok(Json(SignInResponse {
        message: "Signed in successfully".into(),
        token: output.token,
        user: output.user,
    }))
}
