//! Ticket aggregation
//!
//! Pure functions over a fetched ticket list. Nothing here talks to the
//! network, so every aggregate can be tested with hand-built tickets.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::client::Ticket;

/// State name that counts as closed (compared case-insensitively)
pub const CLOSED_STATE: &str = "closed";

/// Summary counts over a set of tickets.
///
/// `open_tickets + closed_tickets <= total_tickets`: tickets without a state
/// are only counted in the total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStatistics {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub closed_tickets: u64,
    /// Raw state name -> count (keys are case-sensitive)
    #[serde(default)]
    pub tickets_by_state: BTreeMap<String, u64>,
    /// Raw priority name -> count (keys are case-sensitive)
    #[serde(default)]
    pub tickets_by_priority: BTreeMap<String, u64>,
}

impl TicketStatistics {
    /// Tickets that carry no state at all.
    pub fn stateless_tickets(&self) -> u64 {
        self.total_tickets - self.open_tickets - self.closed_tickets
    }
}

/// One entry of the top-customers ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerTicketCount {
    pub customer_id: i64,
    pub ticket_count: u64,
}

/// Customers ranked by number of tickets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCustomersResponse {
    /// Descending by ticket count, ties by ascending customer id
    pub customers: Vec<CustomerTicketCount>,
    /// Requested maximum length of `customers`
    pub limit: usize,
    /// Distinct customers before truncation
    pub total_customers: usize,
}

/// Compute summary statistics in a single pass.
///
/// Open/closed classification ignores case, while the state and priority
/// groupings keep the upstream spelling, so `"Closed"` and `"closed"` are one
/// closed count but two `tickets_by_state` keys.
pub fn compute_statistics(tickets: &[Ticket]) -> TicketStatistics {
    let mut stats = TicketStatistics {
        total_tickets: tickets.len() as u64,
        ..Default::default()
    };

    for ticket in tickets {
        if let Some(state) = ticket.state.as_deref().filter(|s| !s.is_empty()) {
            if state.eq_ignore_ascii_case(CLOSED_STATE) {
                stats.closed_tickets += 1;
            } else {
                stats.open_tickets += 1;
            }
            *stats.tickets_by_state.entry(state.to_string()).or_insert(0) += 1;
        }

        if let Some(priority) = ticket.priority.as_deref().filter(|p| !p.is_empty()) {
            *stats
                .tickets_by_priority
                .entry(priority.to_string())
                .or_insert(0) += 1;
        }
    }

    stats
}

/// Rank customers by ticket count and keep the first `limit`.
pub fn top_customers(tickets: &[Ticket], limit: usize) -> TopCustomersResponse {
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for customer_id in tickets.iter().filter_map(|t| t.customer_id) {
        *counts.entry(customer_id).or_insert(0) += 1;
    }

    let total_customers = counts.len();
    let mut customers: Vec<CustomerTicketCount> = counts
        .into_iter()
        .map(|(customer_id, ticket_count)| CustomerTicketCount {
            customer_id,
            ticket_count,
        })
        .collect();

    customers.sort_by(|a, b| {
        b.ticket_count
            .cmp(&a.ticket_count)
            .then(a.customer_id.cmp(&b.customer_id))
    });
    customers.truncate(limit);

    TopCustomersResponse {
        customers,
        limit,
        total_customers,
    }
}
