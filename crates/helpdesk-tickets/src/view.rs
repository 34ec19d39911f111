//! Enriched ticket representation for API responses.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use helpdesk_core::models::ticket::{Priority, Ticket, TicketStatus};
use serde::Serialize;
use uuid::Uuid;

/// Display name used when a referenced user no longer resolves.
pub(crate) const UNKNOWN_USER: &str = "Unknown";
/// Display name for a ticket with no assignee.
pub(crate) const UNASSIGNED: &str = "Unassigned";

/// A ticket enriched with display names for its user references.
///
/// Dangling references (a deleted user, say) degrade to `"Unknown"`
/// rather than failing the whole listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_by: Uuid,
    pub created_by_name: String,
    pub assigned_to: Option<Uuid>,
    pub assigned_to_name: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketView {
    /// Build the view from a ticket and a pre-fetched name map.
    pub(crate) fn enrich(ticket: Ticket, names: &HashMap<Uuid, String>) -> Self {
        let created_by_name = names
            .get(&ticket.created_by)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_USER.to_string());

        let assigned_to_name = match ticket.assigned_to {
            None => UNASSIGNED.to_string(),
            Some(id) => names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_USER.to_string()),
        };

        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            created_by: ticket.created_by,
            created_by_name,
            assigned_to: ticket.assigned_to,
            assigned_to_name,
            status: ticket.status,
            priority: ticket.priority,
            category: ticket.category,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}
