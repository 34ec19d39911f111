//! Shared application state.

use std::sync::Arc;

use helpdesk_assist::{AssistConfig, AssistError, AssistService, HttpPromptRunner};
use helpdesk_auth::{AuthConfig, AuthService};
use helpdesk_db::repository::{SurrealTicketRepository, SurrealUserRepository};
use helpdesk_tickets::TicketService;
use surrealdb::{Connection, Surreal};

/// Everything the handlers need, built once at the composition root.
///
/// Generic over the SurrealDB engine so the same router runs against
/// the WebSocket client in production and the in-memory engine in
/// tests.
pub struct AppState<C: Connection> {
    pub auth: Arc<AuthService<SurrealUserRepository<C>>>,
    pub tickets: Arc<TicketService<SurrealTicketRepository<C>, SurrealUserRepository<C>>>,
    pub users: Arc<SurrealUserRepository<C>>,
    pub assist: Arc<AssistService<HttpPromptRunner>>,
    pub auth_config: Arc<AuthConfig>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            tickets: Arc::clone(&self.tickets),
            users: Arc::clone(&self.users),
            assist: Arc::clone(&self.assist),
            auth_config: Arc::clone(&self.auth_config),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(
        db: Surreal<C>,
        auth_config: AuthConfig,
        assist_config: AssistConfig,
    ) -> Result<Self, AssistError> {
        let users = SurrealUserRepository::new(db.clone());
        let tickets = SurrealTicketRepository::new(db);

        let max_retries = assist_config.max_retries;
        let runner = HttpPromptRunner::new(assist_config)?;

        Ok(Self {
            auth: Arc::new(AuthService::new(users.clone(), auth_config.clone())),
            tickets: Arc::new(TicketService::new(tickets, users.clone())),
            users: Arc::new(users),
            assist: Arc::new(AssistService::new(runner, max_retries)),
            auth_config: Arc::new(auth_config),
        })
    }
}
