//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Services are generic over
//! these traits so that business logic has no dependency on the
//! database crate.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::HelpdeskResult;
use crate::models::{
    ticket::{CreateTicket, Ticket, TicketPatch},
    user::{CreateUser, User},
};

pub trait UserRepository: Send + Sync {
    /// Persist a new user with a pre-hashed password. A duplicate
    /// email must be rejected.
    fn create(&self, input: CreateUser) -> impl Future<Output = HelpdeskResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HelpdeskResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = HelpdeskResult<User>> + Send;
    fn list(&self) -> impl Future<Output = HelpdeskResult<Vec<User>>> + Send;

    /// Batch lookup of display names for reference enrichment.
    ///
    /// Ids that cannot be resolved are simply absent from the map;
    /// callers degrade to a sentinel rather than failing.
    fn display_names(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = HelpdeskResult<HashMap<Uuid, String>>> + Send;
}

pub trait TicketRepository: Send + Sync {
    fn create(&self, input: CreateTicket) -> impl Future<Output = HelpdeskResult<Ticket>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HelpdeskResult<Ticket>> + Send;
    fn update(
        &self,
        id: Uuid,
        patch: TicketPatch,
    ) -> impl Future<Output = HelpdeskResult<Ticket>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = HelpdeskResult<()>> + Send;
    fn list(&self) -> impl Future<Output = HelpdeskResult<Vec<Ticket>>> + Send;

    /// Atomic conditional self-assign: set `assigned_to` and move the
    /// ticket to "in progress" only if it is still open and
    /// unassigned. Returns the updated ticket when the update applied,
    /// `None` when the condition did not hold. Expressed as a single
    /// conditional update at the store layer so two concurrent claims
    /// cannot both win.
    fn claim(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = HelpdeskResult<Option<Ticket>>> + Send;
}
