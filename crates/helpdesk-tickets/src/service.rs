//! Ticket lifecycle service.
//!
//! Every operation takes the acting user and enforces the role rules
//! here, server-side. Employees see only tickets they created or are
//! assigned to; support staff see and manage everything.

use std::collections::{HashMap, HashSet};

use helpdesk_core::error::{HelpdeskError, HelpdeskResult};
use helpdesk_core::models::ticket::{CreateTicket, Priority, Ticket, TicketPatch};
use helpdesk_core::models::user::Role;
use helpdesk_core::repository::{TicketRepository, UserRepository};
use tracing::{info, warn};
use uuid::Uuid;

use crate::filter::TicketFilter;
use crate::view::TicketView;

/// The authenticated user an operation runs as.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_support(&self) -> bool {
        self.role == Role::Support
    }
}

/// Input for ticket creation. Priority arrives as free text and is
/// normalized to the canonical lowercase form.
#[derive(Debug, Clone)]
pub struct CreateTicketInput {
    pub title: String,
    pub description: String,
    pub priority: Option<String>,
    pub category: String,
}

/// Result of a self-assign attempt on an existing ticket.
#[derive(Debug, Clone)]
pub enum ClaimOutcome {
    /// The conditional update applied; the ticket is now assigned to
    /// the actor and in progress.
    Claimed(Ticket),
    /// The ticket was no longer open and unassigned; nothing changed.
    AlreadyTaken(Ticket),
}

impl ClaimOutcome {
    pub fn ticket(&self) -> &Ticket {
        match self {
            ClaimOutcome::Claimed(t) | ClaimOutcome::AlreadyTaken(t) => t,
        }
    }

    pub fn was_claimed(&self) -> bool {
        matches!(self, ClaimOutcome::Claimed(_))
    }
}

pub struct TicketService<T: TicketRepository, U: UserRepository> {
    tickets: T,
    users: U,
}

impl<T: TicketRepository, U: UserRepository> TicketService<T, U> {
    pub fn new(tickets: T, users: U) -> Self {
        Self { tickets, users }
    }

    /// Create a ticket owned by the actor. New tickets are always
    /// open and unassigned.
    pub async fn create_ticket(
        &self,
        actor: &Actor,
        input: CreateTicketInput,
    ) -> HelpdeskResult<Ticket> {
        if input.title.trim().is_empty() {
            return Err(HelpdeskError::validation("Title is required"));
        }
        if input.description.trim().is_empty() {
            return Err(HelpdeskError::validation("Description is required"));
        }
        if input.category.trim().is_empty() {
            return Err(HelpdeskError::validation("Category is required"));
        }

        let priority = match input.priority.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(raw) => Priority::normalize(raw)?,
            None => Priority::default(),
        };

        let ticket = self
            .tickets
            .create(CreateTicket {
                title: input.title,
                description: input.description,
                priority,
                category: input.category,
                created_by: actor.user_id,
            })
            .await?;

        info!(ticket_id = %ticket.id, priority = priority.as_str(), "Ticket created");

        Ok(ticket)
    }

    /// List tickets visible to the actor, enriched with display names
    /// and filtered.
    ///
    /// Role scoping happens before filtering: an employee's search
    /// never surfaces other people's tickets.
    pub async fn list_tickets(
        &self,
        actor: &Actor,
        filter: &TicketFilter,
    ) -> HelpdeskResult<Vec<TicketView>> {
        let compiled = filter.compile()?;

        let mut tickets = self.tickets.list().await?;
        if !actor.is_support() {
            tickets.retain(|t| {
                t.created_by == actor.user_id || t.assigned_to == Some(actor.user_id)
            });
        }

        let names = self.resolve_names(&tickets).await?;

        Ok(tickets
            .into_iter()
            .map(|t| TicketView::enrich(t, &names))
            .filter(|v| compiled.matches(v))
            .collect())
    }

    /// Fetch a single ticket, enriched. Employees can only fetch
    /// tickets they would see in their listing.
    pub async fn get_ticket(&self, actor: &Actor, id: Uuid) -> HelpdeskResult<TicketView> {
        let ticket = self.tickets.get_by_id(id).await?;

        if !actor.is_support()
            && ticket.created_by != actor.user_id
            && ticket.assigned_to != Some(actor.user_id)
        {
            return Err(HelpdeskError::AuthorizationDenied {
                reason: "You do not have access to this ticket".into(),
            });
        }

        let names = self.resolve_names(std::slice::from_ref(&ticket)).await?;
        Ok(TicketView::enrich(ticket, &names))
    }

    /// Claim an open, unassigned ticket for the acting user. Any
    /// authenticated actor may claim; this is the one status change
    /// available to non-support users.
    ///
    /// The store performs a single conditional update, so of two
    /// concurrent claims exactly one applies; the loser sees the
    /// ticket unchanged rather than silently overwriting.
    pub async fn self_assign(&self, actor: &Actor, id: Uuid) -> HelpdeskResult<ClaimOutcome> {
        match self.tickets.claim(id, actor.user_id).await? {
            Some(ticket) => {
                info!(ticket_id = %id, assignee = %actor.user_id, "Ticket claimed");
                Ok(ClaimOutcome::Claimed(ticket))
            }
            None => {
                // Distinguish "gone" from "someone beat you to it".
                let existing = self.tickets.get_by_id(id).await?;
                warn!(ticket_id = %id, status = existing.status.as_str(), "Claim lost");
                Ok(ClaimOutcome::AlreadyTaken(existing))
            }
        }
    }

    /// Apply a field-level edit. Support only.
    pub async fn update_ticket(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: TicketPatch,
    ) -> HelpdeskResult<Ticket> {
        if !actor.is_support() {
            return Err(HelpdeskError::AuthorizationDenied {
                reason: "Only support staff can update tickets".into(),
            });
        }
        if patch.is_empty() {
            return Err(HelpdeskError::validation("No fields to update"));
        }

        let ticket = self.tickets.update(id, patch).await?;
        info!(ticket_id = %id, "Ticket updated");
        Ok(ticket)
    }

    /// Remove a ticket permanently. Support only.
    pub async fn delete_ticket(&self, actor: &Actor, id: Uuid) -> HelpdeskResult<()> {
        if !actor.is_support() {
            return Err(HelpdeskError::AuthorizationDenied {
                reason: "Only support staff can delete tickets".into(),
            });
        }

        self.tickets.delete(id).await?;
        info!(ticket_id = %id, "Ticket deleted");
        Ok(())
    }

    /// One batched name lookup for all user references in a slice of
    /// tickets.
    async fn resolve_names(&self, tickets: &[Ticket]) -> HelpdeskResult<HashMap<Uuid, String>> {
        let ids: HashSet<Uuid> = tickets
            .iter()
            .flat_map(|t| [Some(t.created_by), t.assigned_to])
            .flatten()
            .collect();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = ids.into_iter().collect();
        self.users.display_names(&ids).await
    }
}
