//! Grafana simple-JSON datasource
//!
//! Plain GET endpoints returning `{target, datapoints}` series or flat rows.

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::output::{GrafanaTarget, TimeSeries, format_rows, tickets_created};
use crate::server::{AppState, HttpError};

#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub target: Option<String>,
}

/// `GET /grafana/tickets/timeseries`. `from`/`to` are accepted but the full
/// history is always returned.
pub async fn tickets_timeseries(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeSeries>>, HttpError> {
    Ok(Json(timeseries(&state).await?))
}

/// `GET /grafana/tickets/by-state`
pub async fn tickets_by_state(
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, Value>>>, HttpError> {
    Ok(Json(by_state(&state).await?))
}

/// `GET /grafana/tickets/by-priority`
pub async fn tickets_by_priority(
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, Value>>>, HttpError> {
    Ok(Json(by_priority(&state).await?))
}

/// `GET /grafana/query?target=`
pub async fn query(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Value>, HttpError> {
    let Some(target) = GrafanaTarget::from_simple(params.target.as_deref()) else {
        return Ok(Json(Value::Array(Vec::new())));
    };

    let payload = match target {
        GrafanaTarget::TicketsTimeseries => to_value(timeseries(&state).await?),
        GrafanaTarget::TicketsByState => to_value(by_state(&state).await?),
        GrafanaTarget::TicketsByPriority => to_value(by_priority(&state).await?),
        scalar => {
            let stats = state
                .service
                .ticket_statistics()
                .await
                .map_err(|e| HttpError::service("Error processing Grafana query", e))?;
            let value = scalar.scalar(&stats).unwrap_or_default();
            to_value(vec![TimeSeries::single_point(
                scalar.series_label(),
                value,
                Utc::now(),
            )])
        }
    };

    Ok(Json(payload))
}

/// `GET /grafana/search`
pub async fn search() -> Json<Vec<&'static str>> {
    Json(GrafanaTarget::names())
}

/// `GET /grafana/annotations`
pub async fn annotations() -> Json<Vec<Value>> {
    Json(Vec::new())
}

async fn timeseries(state: &AppState) -> Result<Vec<TimeSeries>, HttpError> {
    let tickets = state
        .service
        .all_tickets()
        .await
        .map_err(|e| HttpError::service("Error generating time-series data", e))?;
    Ok(tickets_created(&tickets))
}

async fn by_state(state: &AppState) -> Result<Vec<Map<String, Value>>, HttpError> {
    let stats = state
        .service
        .ticket_statistics()
        .await
        .map_err(|e| HttpError::service("Error getting tickets by state", e))?;
    Ok(format_rows("state", &stats.tickets_by_state))
}

async fn by_priority(state: &AppState) -> Result<Vec<Map<String, Value>>, HttpError> {
    let stats = state
        .service
        .ticket_statistics()
        .await
        .map_err(|e| HttpError::service("Error getting tickets by priority", e))?;
    Ok(format_rows("priority", &stats.tickets_by_priority))
}

fn to_value<T: serde::Serialize>(payload: T) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}
