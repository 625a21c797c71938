//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use super::models::{Organization, Ticket, User};

// ============================================================================
// TicketBuilder
// ============================================================================

/// Builder for creating test Ticket instances.
///
/// # Example
/// ```ignore
/// let ticket = TicketBuilder::new(1)
///     .state("open")
///     .priority("2 normal")
///     .created_at(utc(2024, 3, 1, 9))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    /// Create a new builder with the given ID and no optional fields set.
    pub fn new(id: i64) -> Self {
        Self {
            ticket: Ticket {
                id,
                number: Some(format!("{}", 31000 + id)),
                title: Some(format!("Ticket {}", id)),
                state: None,
                priority: None,
                created_at: None,
                updated_at: None,
                customer_id: None,
                organization_id: None,
            },
        }
    }

    /// Set the state name.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.ticket.state = Some(state.into());
        self
    }

    /// Set the priority name.
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.ticket.priority = Some(priority.into());
        self
    }

    /// Set the creation time.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.ticket.created_at = Some(created_at);
        self
    }

    /// Set the customer ID.
    pub fn customer(mut self, customer_id: i64) -> Self {
        self.ticket.customer_id = Some(customer_id);
        self
    }

    /// Set the organization ID.
    pub fn organization(mut self, organization_id: i64) -> Self {
        self.ticket.organization_id = Some(organization_id);
        self
    }

    /// Build the Ticket instance.
    pub fn build(self) -> Ticket {
        self.ticket
    }
}

/// Plain tickets (no state/priority) for each ID in the range.
pub fn tickets_with_ids(ids: impl IntoIterator<Item = i64>) -> Vec<Ticket> {
    ids.into_iter().map(|id| TicketBuilder::new(id).build()).collect()
}

/// Shorthand for a UTC timestamp at the top of an hour.
pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid test timestamp")
}

/// Organization with a name and active flag.
pub fn organization(id: i64, name: &str) -> Organization {
    Organization {
        id,
        name: Some(name.to_string()),
        active: Some(true),
        created_at: None,
        updated_at: None,
    }
}

/// Active user with a login and email derived from it.
pub fn user(id: i64, login: &str) -> User {
    User {
        id,
        login: Some(login.to_string()),
        firstname: None,
        lastname: None,
        email: Some(format!("{}@example.com", login)),
        active: Some(true),
        created_at: None,
        updated_at: None,
    }
}
