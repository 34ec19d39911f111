//! User lookup handlers.

use axum::Json;
use axum::extract::{Query, State};
use helpdesk_core::models::user::PublicUser;
use helpdesk_core::repository::UserRepository;
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

pub(crate) async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<PublicUser>>> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(|u| u.to_public()).collect()))
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserIdQuery {
    id: Uuid,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserSummary {
    name: String,
    email: String,
}

pub(crate) async fn get_one<C: Connection>(
    State(state): State<AppState<C>>,
    _user: AuthUser,
    Query(query): Query<UserIdQuery>,
) -> ApiResult<Json<UserSummary>> {
    let user = state.users.get_by_id(query.id).await?;
    Ok(Json(UserSummary {
        name: user.name,
        email: user.email,
    }))
}
