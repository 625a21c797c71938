//! Zammad API client

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod zammad;

#[cfg(test)]
pub use mock::MockZammadClient;
pub use models::{Organization, Ticket, User};
pub use pagination::{ListParams, MAX_PAGE_SIZE, PaginationParams};
pub use zammad::ZammadClient;

/// Read access to the Zammad helpdesk.
///
/// The server only ever talks to the helpdesk through this trait so the data
/// source can be swapped for [`MockZammadClient`] in tests.
#[async_trait]
pub trait ZammadApi: Send + Sync {
    /// List tickets, following pages when `pagination.fetch_all` is set
    async fn list_tickets(&self, pagination: &PaginationParams) -> Result<Vec<Ticket>>;

    /// Fetch a single ticket. `Ok(None)` when the ticket does not exist.
    async fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>>;

    /// List organizations with optional limit/offset
    async fn list_organizations(&self, params: &ListParams) -> Result<Vec<Organization>>;

    /// List users with optional limit/offset
    async fn list_users(&self, params: &ListParams) -> Result<Vec<User>>;
}
