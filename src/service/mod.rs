//! Business logic over the Zammad API
//!
//! [`ZammadService`] fetches records through a [`ZammadApi`] and derives the
//! aggregates the HTTP layer serves. Every call fetches fresh data.

use std::sync::Arc;

use log::debug;

use crate::client::{ListParams, Organization, PaginationParams, Ticket, User, ZammadApi};
use crate::error::Result;

pub mod statistics;

pub use statistics::{
    CustomerTicketCount, TicketStatistics, TopCustomersResponse, compute_statistics,
    top_customers,
};

/// Service for Zammad operations
#[derive(Clone)]
pub struct ZammadService {
    api: Arc<dyn ZammadApi>,
}

impl ZammadService {
    pub fn new(api: Arc<dyn ZammadApi>) -> Self {
        Self { api }
    }

    /// List tickets with the given pagination.
    pub async fn list_tickets(&self, pagination: &PaginationParams) -> Result<Vec<Ticket>> {
        self.api.list_tickets(pagination).await
    }

    /// Every ticket, newest first.
    pub async fn all_tickets(&self) -> Result<Vec<Ticket>> {
        let tickets = self
            .api
            .list_tickets(&PaginationParams::new().fetch_all(true))
            .await?;
        debug!("Fetched {} tickets for aggregation", tickets.len());
        Ok(tickets)
    }

    pub async fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>> {
        self.api.get_ticket(ticket_id).await
    }

    pub async fn list_organizations(&self, params: &ListParams) -> Result<Vec<Organization>> {
        self.api.list_organizations(params).await
    }

    pub async fn list_users(&self, params: &ListParams) -> Result<Vec<User>> {
        self.api.list_users(params).await
    }

    /// Statistics over every ticket.
    pub async fn ticket_statistics(&self) -> Result<TicketStatistics> {
        let tickets = self.all_tickets().await?;
        Ok(compute_statistics(&tickets))
    }

    /// Top `limit` customers by ticket count over every ticket.
    pub async fn top_customers(&self, limit: usize) -> Result<TopCustomersResponse> {
        let tickets = self.all_tickets().await?;
        Ok(top_customers(&tickets, limit))
    }
}
