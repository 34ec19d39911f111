//! Assistive AI flow handlers. Authenticated, any role.

use axum::Json;
use axum::extract::State;
use helpdesk_assist::{
    SentimentInput, SentimentOutput, StressInput, StressOutput, VoiceClarityInput,
    VoiceClarityOutput,
};
use surrealdb::Connection;

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

pub(crate) async fn sentiment<C: Connection>(
    State(state): State<AppState<C>>,
    _user: AuthUser,
    Json(input): Json<SentimentInput>,
) -> ApiResult<Json<SentimentOutput>> {
    let output = state.assist.analyze_sentiment(input).await?;
    Ok(Json(output))
}

pub(crate) async fn stress<C: Connection>(
    State(state): State<AppState<C>>,
    _user: AuthUser,
    Json(input): Json<StressInput>,
) -> ApiResult<Json<StressOutput>> {
    let output = state.assist.analyze_stress(input).await?;
    Ok(Json(output))
}

pub(crate) async fn voice_clarity<C: Connection>(
    State(state): State<AppState<C>>,
    _user: AuthUser,
    Json(input): Json<VoiceClarityInput>,
) -> ApiResult<Json<VoiceClarityOutput>> {
    let output = state.assist.enhance_voice_clarity(input).await?;
    Ok(Json(output))
}
