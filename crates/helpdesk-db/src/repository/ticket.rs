//! SurrealDB implementation of [`TicketRepository`].
//!
//! Creator/assignee references are stored as UUID strings. Status and
//! priority are stored in their canonical lowercase form and guarded
//! by ASSERT constraints in the schema.

use chrono::{DateTime, Utc};
use helpdesk_core::error::HelpdeskResult;
use helpdesk_core::models::ticket::{CreateTicket, Priority, Ticket, TicketPatch, TicketStatus};
use helpdesk_core::repository::TicketRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, Deserialize)]
struct TicketRow {
    title: String,
    description: String,
    created_by: String,
    assigned_to: Option<String>,
    status: String,
    priority: String,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, Deserialize)]
struct TicketRowWithId {
    record_id: String,
    title: String,
    description: String,
    created_by: String,
    assigned_to: Option<String>,
    status: String,
    priority: String,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_uuid(s: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn parse_status(s: &str) -> Result<TicketStatus, DbError> {
    TicketStatus::parse(s).map_err(|e| DbError::Decode(e.to_string()))
}

fn parse_priority(s: &str) -> Result<Priority, DbError> {
    Priority::normalize(s).map_err(|e| DbError::Decode(e.to_string()))
}

impl TicketRow {
    fn into_ticket(self, id: Uuid) -> Result<Ticket, DbError> {
        Ok(Ticket {
            id,
            title: self.title,
            description: self.description,
            created_by: parse_uuid(&self.created_by, "creator")?,
            assigned_to: self
                .assigned_to
                .map(|s| parse_uuid(&s, "assignee"))
                .transpose()?,
            status: parse_status(&self.status)?,
            priority: parse_priority(&self.priority)?,
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TicketRowWithId {
    fn try_into_ticket(self) -> Result<Ticket, DbError> {
        let id = parse_uuid(&self.record_id, "ticket")?;
        Ok(Ticket {
            id,
            title: self.title,
            description: self.description,
            created_by: parse_uuid(&self.created_by, "creator")?,
            assigned_to: self
                .assigned_to
                .map(|s| parse_uuid(&s, "assignee"))
                .transpose()?,
            status: parse_status(&self.status)?,
            priority: parse_priority(&self.priority)?,
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Ticket repository.
#[derive(Clone)]
pub struct SurrealTicketRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTicketRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TicketRepository for SurrealTicketRepository<C> {
    async fn create(&self, input: CreateTicket) -> HelpdeskResult<Ticket> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::thing('ticket', $id) SET \
                 title = $title, description = $description, \
                 created_by = $created_by, \
                 assigned_to = NONE, \
                 status = 'open', \
                 priority = $priority, \
                 category = $category",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("description", input.description))
            .bind(("created_by", input.created_by.to_string()))
            .bind(("priority", input.priority.as_str()))
            .bind(("category", input.category))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ticket".into(),
            id: id_str,
        })?;

        Ok(row.into_ticket(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> HelpdeskResult<Ticket> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::thing('ticket', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ticket".into(),
            id: id_str,
        })?;

        Ok(row.into_ticket(id)?)
    }

    async fn update(&self, id: Uuid, patch: TicketPatch) -> HelpdeskResult<Ticket> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if patch.title.is_some() {
            sets.push("title = $title");
        }
        if patch.description.is_some() {
            sets.push("description = $description");
        }
        match patch.assigned_to {
            Some(Some(_)) => sets.push("assigned_to = $assigned_to"),
            Some(None) => sets.push("assigned_to = NONE"),
            None => {}
        }
        if patch.status.is_some() {
            sets.push("status = $status");
        }
        if patch.priority.is_some() {
            sets.push("priority = $priority");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::thing('ticket', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(title) = patch.title {
            builder = builder.bind(("title", title));
        }
        if let Some(description) = patch.description {
            builder = builder.bind(("description", description));
        }
        if let Some(Some(assignee)) = patch.assigned_to {
            builder = builder.bind(("assigned_to", assignee.to_string()));
        }
        if let Some(status) = patch.status {
            builder = builder.bind(("status", status.as_str()));
        }
        if let Some(priority) = patch.priority {
            builder = builder.bind(("priority", priority.as_str()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ticket".into(),
            id: id_str,
        })?;

        Ok(row.into_ticket(id)?)
    }

    async fn delete(&self, id: Uuid) -> HelpdeskResult<()> {
        let id_str = id.to_string();

        // RETURN BEFORE distinguishes a real delete from a missing id.
        let mut result = self
            .db
            .query("DELETE type::thing('ticket', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "ticket".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list(&self) -> HelpdeskResult<Vec<Ticket>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM ticket \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TicketRowWithId> = result.take(0).map_err(DbError::from)?;

        let tickets = rows
            .into_iter()
            .map(|row| row.try_into_ticket())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(tickets)
    }

    async fn claim(&self, id: Uuid, user_id: Uuid) -> HelpdeskResult<Option<Ticket>> {
        let id_str = id.to_string();

        // Single conditional UPDATE — the open/unassigned check and
        // the write happen in one statement, so concurrent claims
        // cannot both apply.
        let mut result = self
            .db
            .query(
                "UPDATE type::thing('ticket', $id) SET \
                 assigned_to = $user_id, \
                 status = 'in progress', \
                 updated_at = time::now() \
                 WHERE status = 'open' AND assigned_to IS NONE",
            )
            .bind(("id", id_str))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TicketRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_ticket(id)?)),
            None => Ok(None),
        }
    }
}
