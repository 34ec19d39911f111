//! Ticket handlers.
//!
//! The acting user always comes from the verified token, never from
//! the request body. Role checks live in the ticket service; handlers
//! only translate between HTTP and service types.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use helpdesk_core::error::HelpdeskResult;
use helpdesk_core::models::ticket::{Priority, Ticket, TicketPatch, TicketStatus};
use serde::{Deserialize, Deserializer, Serialize};
use surrealdb::Connection;
use uuid::Uuid;

use helpdesk_tickets::{CreateTicketInput, TicketFilter, TicketView};

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

pub(crate) async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    user: AuthUser,
    Query(filter): Query<TicketFilter>,
) -> ApiResult<Json<Vec<TicketView>>> {
    let views = state.tickets.list_tickets(&user.actor(), &filter).await?;
    Ok(Json(views))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateTicketRequest {
    title: String,
    description: String,
    priority: Option<String>,
    category: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TicketResponse {
    message: String,
    ticket: Ticket,
}

pub(crate) async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    user: AuthUser,
    Json(req): Json<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<TicketResponse>)> {
    let ticket = state
        .tickets
        .create_ticket(
            &user.actor(),
            CreateTicketInput {
                title: req.title,
                description: req.description,
                priority: req.priority,
                category: req.category,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TicketResponse {
            message: "Ticket created successfully".into(),
            ticket,
        }),
    ))
}

pub(crate) async fn get_one<C: Connection>(
    State(state): State<AppState<C>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TicketView>> {
    let view = state.tickets.get_ticket(&user.actor(), id).await?;
    Ok(Json(view))
}

/// Distinguishes an absent field from an explicit `null`: absent
/// means "leave unchanged", `null` means "clear the assignee".
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Uuid>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTicketRequest {
    title: Option<String>,
    description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    assigned_to: Option<Option<Uuid>>,
    status: Option<String>,
    priority: Option<String>,
}

impl UpdateTicketRequest {
    fn into_patch(self) -> HelpdeskResult<TicketPatch> {
        let status = self.status.as_deref().map(TicketStatus::parse).transpose()?;
        let priority = self
            .priority
            .as_deref()
            .map(Priority::normalize)
            .transpose()?;

        Ok(TicketPatch {
            title: self.title,
            description: self.description,
            assigned_to: self.assigned_to,
            status,
            priority,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTicketWithId {
    id: Uuid,
    #[serde(flatten)]
    fields: UpdateTicketRequest,
}

/// `PATCH /tickets` with the target id in the body.
pub(crate) async fn patch<C: Connection>(
    State(state): State<AppState<C>>,
    user: AuthUser,
    Json(req): Json<UpdateTicketWithId>,
) -> ApiResult<Json<TicketResponse>> {
    let ticket = state
        .tickets
        .update_ticket(&user.actor(), req.id, req.fields.into_patch()?)
        .await?;

    Ok(Json(TicketResponse {
        message: "Ticket updated successfully".into(),
        ticket,
    }))
}

/// `PUT /tickets/{id}` with the target id in the path.
pub(crate) async fn put<C: Connection>(
    State(state): State<AppState<C>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTicketRequest>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state
        .tickets
        .update_ticket(&user.actor(), id, req.into_patch()?)
        .await?;

    Ok(Json(ticket))
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteResponse {
    message: String,
}

pub(crate) async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    state.tickets.delete_ticket(&user.actor(), id).await?;

    Ok(Json(DeleteResponse {
        message: "Ticket deleted successfully".into(),
    }))
}

pub(crate) async fn self_assign<C: Connection>(
    State(state): State<AppState<C>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TicketResponse>> {
    let outcome = state.tickets.self_assign(&user.actor(), id).await?;

    let message = if outcome.was_claimed() {
        "Ticket assigned successfully"
    } else {
        "Ticket is already assigned"
    };

    Ok(Json(TicketResponse {
        message: message.into(),
        ticket: outcome.ticket().clone(),
    }))
}
