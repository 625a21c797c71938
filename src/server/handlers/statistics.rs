//! Aggregated ticket statistics

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;

use super::{MAX_LIMIT, check_range};
use crate::server::{AppState, HttpError};
use crate::service::{TicketStatistics, TopCustomersResponse};

/// Ranking length when the request carries no `limit`
pub const DEFAULT_TOP_CUSTOMERS: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct TopCustomersQuery {
    pub limit: Option<usize>,
}

/// `GET /statistics/tickets`
pub async fn ticket_statistics(
    State(state): State<AppState>,
) -> Result<Json<TicketStatistics>, HttpError> {
    let stats = state
        .service
        .ticket_statistics()
        .await
        .map_err(|e| HttpError::service("Error calculating statistics", e))?;

    Ok(Json(stats))
}

/// `GET /statistics/top-customers`
pub async fn top_customers(
    State(state): State<AppState>,
    query: Result<Query<TopCustomersQuery>, QueryRejection>,
) -> Result<Json<TopCustomersResponse>, HttpError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_TOP_CUSTOMERS);
    check_range("limit", limit, 1, MAX_LIMIT)?;

    let ranking = state
        .service
        .top_customers(limit)
        .await
        .map_err(|e| HttpError::service("Error getting top customers", e))?;

    Ok(Json(ranking))
}
