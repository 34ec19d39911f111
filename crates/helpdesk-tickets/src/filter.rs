//! Listing filters.

use helpdesk_core::error::HelpdeskResult;
use helpdesk_core::models::ticket::{Priority, TicketStatus};
use serde::Deserialize;

use crate::view::TicketView;

/// Optional filters applied to a ticket listing, after role scoping
/// and name enrichment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    /// Exact status match (stored form, e.g. "in progress").
    pub status: Option<String>,
    /// Priority match, any casing.
    pub priority: Option<String>,
    /// Case-insensitive substring search over title, description,
    /// creator name and assignee name.
    pub search: Option<String>,
}

impl TicketFilter {
    /// Parse the string fields up front so an invalid filter fails the
    /// request instead of silently matching nothing.
    pub(crate) fn compile(&self) -> HelpdeskResult<CompiledFilter> {
        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => Some(TicketStatus::parse(s)?),
            None => None,
        };
        let priority = match self.priority.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => Some(Priority::normalize(s)?),
            None => None,
        };
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Ok(CompiledFilter {
            status,
            priority,
            search,
        })
    }
}

pub(crate) struct CompiledFilter {
    status: Option<TicketStatus>,
    priority: Option<Priority>,
    search: Option<String>,
}

impl CompiledFilter {
    pub(crate) fn matches(&self, view: &TicketView) -> bool {
        if self.status.is_some_and(|status| view.status != status) {
            return false;
        }
        if self.priority.is_some_and(|priority| view.priority != priority) {
            return false;
        }
        if let Some(needle) = &self.search {
            let haystacks = [
                &view.title,
                &view.description,
                &view.created_by_name,
                &view.assigned_to_name,
            ];
            return haystacks
                .iter()
                .any(|field| field.to_lowercase().contains(needle));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_compiles_to_match_all() {
        let compiled = TicketFilter::default().compile().unwrap();
        assert!(compiled.status.is_none());
        assert!(compiled.priority.is_none());
        assert!(compiled.search.is_none());
    }

    #[test]
    fn invalid_status_filter_is_rejected() {
        let filter = TicketFilter {
            status: Some("OPEN".into()),
            ..Default::default()
        };
        assert!(filter.compile().is_err());
    }

    #[test]
    fn priority_filter_accepts_any_casing() {
        let filter = TicketFilter {
            priority: Some("URGENT".into()),
            ..Default::default()
        };
        let compiled = filter.compile().unwrap();
        assert_eq!(compiled.priority, Some(Priority::Urgent));
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = TicketFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(filter.compile().unwrap().search.is_none());
    }
}
