//! Helpdesk Tickets — ticket lifecycle rules on top of the repository
//! traits: creation, role-scoped listing with filtering and name
//! enrichment, atomic self-assignment, and support-only edits.

mod filter;
mod service;
mod view;

pub use filter::TicketFilter;
pub use service::{Actor, ClaimOutcome, CreateTicketInput, TicketService};
pub use view::TicketView;
