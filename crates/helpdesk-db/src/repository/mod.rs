//! SurrealDB repository implementations.

mod ticket;
mod user;

pub use ticket::SurrealTicketRepository;
pub use user::SurrealUserRepository;
