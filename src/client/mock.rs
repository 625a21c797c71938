//! Mock Zammad API client for testing
//!
//! Provides a mock implementation of [`ZammadApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::pagination::collect_pages;
use super::{ListParams, Organization, PaginationParams, Ticket, User, ZammadApi};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockZammadClient::new()
///     .with_tickets(vec![TicketBuilder::new(1).state("open").build()])
///     .await;
///
/// let tickets = mock.list_tickets(&PaginationParams::new()).await?;
/// assert_eq!(tickets.len(), 1);
/// ```
#[derive(Default)]
pub struct MockZammadClient {
    /// Tickets served by list_tickets (paged by the requested page size) and get_ticket
    tickets: Arc<Mutex<Vec<Ticket>>>,
    /// Explicit ticket pages (page 1 -> pages[0]); overrides `tickets` for listings
    ticket_pages: Arc<Mutex<Option<Vec<Vec<Ticket>>>>>,
    /// Organizations to return from list_organizations
    organizations: Arc<Mutex<Vec<Organization>>>,
    /// Users to return from list_users
    users: Arc<Mutex<Vec<User>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    /// Number of ticket pages requested
    pub ticket_pages: usize,
    pub get_ticket: usize,
    pub list_organizations: usize,
    pub list_users: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.ticket_pages + self.get_ticket + self.list_organizations + self.list_users
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_tickets", "list_users")
    pub method: String,
    /// Page number for ticket pages
    pub page: Option<usize>,
    /// Page size for ticket pages
    pub page_size: Option<usize>,
    /// Limit for offset-based listings
    pub limit: Option<usize>,
    /// Offset for offset-based listings
    pub offset: Option<usize>,
}

impl MockZammadClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure tickets to serve from list_tickets and get_ticket.
    pub async fn with_tickets(self, tickets: Vec<Ticket>) -> Self {
        *self.tickets.lock().await = tickets;
        self
    }

    /// Configure explicit ticket pages. Pages past the end are empty.
    pub async fn with_ticket_pages(self, pages: Vec<Vec<Ticket>>) -> Self {
        *self.ticket_pages.lock().await = Some(pages);
        self
    }

    /// Configure organizations to return from list_organizations.
    pub async fn with_organizations(self, organizations: Vec<Organization>) -> Self {
        *self.organizations.lock().await = organizations;
        self
    }

    /// Configure users to return from list_users.
    pub async fn with_users(self, users: Vec<User>) -> Self {
        *self.users.lock().await = users;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture_request(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }

    /// Serve one page of tickets.
    async fn ticket_page(&self, page: usize, page_size: usize) -> Result<Vec<Ticket>> {
        self.capture_request(CapturedRequest {
            method: "list_tickets".to_string(),
            page: Some(page),
            page_size: Some(page_size),
            limit: None,
            offset: None,
        })
        .await;
        self.check_error().await?;

        self.call_count.lock().await.ticket_pages += 1;

        let pages = self.ticket_pages.lock().await;
        if let Some(ref pages) = *pages {
            return Ok(pages.get(page - 1).cloned().unwrap_or_default());
        }
        drop(pages);

        let tickets = self.tickets.lock().await;
        Ok(tickets
            .iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ZammadApi for MockZammadClient {
    async fn list_tickets(&self, pagination: &PaginationParams) -> Result<Vec<Ticket>> {
        let page_size = pagination.effective_page_size();
        collect_pages(pagination, |page| self.ticket_page(page, page_size)).await
    }

    async fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>> {
        self.check_error().await?;
        self.call_count.lock().await.get_ticket += 1;

        let tickets = self.tickets.lock().await;
        Ok(tickets.iter().find(|t| t.id == ticket_id).cloned())
    }

    async fn list_organizations(&self, params: &ListParams) -> Result<Vec<Organization>> {
        self.capture_request(CapturedRequest {
            method: "list_organizations".to_string(),
            page: None,
            page_size: None,
            limit: params.limit,
            offset: params.offset,
        })
        .await;
        self.check_error().await?;
        self.call_count.lock().await.list_organizations += 1;

        Ok(self.organizations.lock().await.clone())
    }

    async fn list_users(&self, params: &ListParams) -> Result<Vec<User>> {
        self.capture_request(CapturedRequest {
            method: "list_users".to_string(),
            page: None,
            page_size: None,
            limit: params.limit,
            offset: params.offset,
        })
        .await;
        self.check_error().await?;
        self.call_count.lock().await.list_users += 1;

        Ok(self.users.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{TicketBuilder, tickets_with_ids};
    use crate::error::Error;

    #[tokio::test]
    async fn test_mock_pages_by_requested_size() {
        let mock = MockZammadClient::new()
            .with_tickets(tickets_with_ids(1..=5))
            .await;

        let params = PaginationParams::new().page_size(2).fetch_all(true);
        let tickets = mock.list_tickets(&params).await.unwrap();

        assert_eq!(tickets.len(), 5);
        // 2 + 2 + 1: the short third page ends the walk
        assert_eq!(mock.call_counts().await.ticket_pages, 3);
    }

    #[tokio::test]
    async fn test_mock_explicit_pages_500_500_137() {
        let pages = vec![
            tickets_with_ids(1..=500),
            tickets_with_ids(501..=1000),
            tickets_with_ids(1001..=1137),
        ];
        let mock = MockZammadClient::new().with_ticket_pages(pages).await;

        let tickets = mock
            .list_tickets(&PaginationParams::new().fetch_all(true))
            .await
            .unwrap();

        assert_eq!(tickets.len(), 1137);
        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].page, Some(3));
        assert_eq!(requests[2].page_size, Some(500));
    }

    #[tokio::test]
    async fn test_mock_empty_first_page_makes_one_call() {
        let mock = MockZammadClient::new().with_ticket_pages(vec![]).await;

        let tickets = mock
            .list_tickets(&PaginationParams::new().fetch_all(true))
            .await
            .unwrap();

        assert!(tickets.is_empty());
        assert_eq!(mock.call_counts().await.total(), 1);
    }

    #[tokio::test]
    async fn test_mock_get_ticket_missing_returns_none() {
        let mock = MockZammadClient::new()
            .with_tickets(vec![TicketBuilder::new(1).build()])
            .await;

        assert!(mock.get_ticket(1).await.unwrap().is_some());
        assert!(mock.get_ticket(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockZammadClient::new()
            .with_error(ApiError::ServerError("down".to_string()))
            .await;

        let first = mock.list_users(&ListParams::default()).await;
        assert!(matches!(first, Err(Error::Api(ApiError::ServerError(_)))));

        let second = mock.list_users(&ListParams::default()).await;
        assert!(second.is_ok());
    }
}
