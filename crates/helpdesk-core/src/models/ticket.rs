//! Ticket domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HelpdeskError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TicketStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "closed")]
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    /// Parse the stored form. Exact, case-sensitive match.
    pub fn parse(s: &str) -> Result<Self, HelpdeskError> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(HelpdeskError::validation(format!(
                "Invalid status '{other}'. Must be one of: open, in progress, resolved, closed"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Normalize input to the canonical lowercase form. Accepts any
    /// casing ("URGENT", "High"); anything outside the enumerated set
    /// is a validation error.
    pub fn normalize(s: &str) -> Result<Self, HelpdeskError> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(HelpdeskError::validation(format!(
                "Invalid priority '{s}'. Must be one of: low, medium, high, urgent"
            ))),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Owning user. Always set.
    pub created_by: Uuid,
    /// Current assignee, if any.
    pub assigned_to: Option<Uuid>,
    pub status: TicketStatus,
    pub priority: Priority,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    pub created_by: Uuid,
}

/// Field-level patch for support-role edits.
///
/// `assigned_to` uses the double-`Option` convention:
/// `Some(Some(id))` = assign, `Some(None)` = clear, `None` = no change.
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<Option<Uuid>>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assigned_to.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_normalizes_any_casing() {
        assert_eq!(Priority::normalize("URGENT").unwrap(), Priority::Urgent);
        assert_eq!(Priority::normalize("High").unwrap(), Priority::High);
        assert_eq!(Priority::normalize("low").unwrap(), Priority::Low);
    }

    #[test]
    fn priority_rejects_unknown() {
        assert!(Priority::normalize("critical").is_err());
        assert!(Priority::normalize("").is_err());
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert_eq!(
            TicketStatus::parse("in progress").unwrap(),
            TicketStatus::InProgress
        );
        assert!(TicketStatus::parse("Resolved").is_err());
        assert!(TicketStatus::parse("OPEN").is_err());
    }

    #[test]
    fn status_serializes_with_space() {
        let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
        assert_eq!(json, "\"in progress\"");
    }
}
