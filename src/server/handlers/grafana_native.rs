//! Grafana JSON API datasource (POST query)

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use chrono::Utc;
use log::warn;
use serde_json::{Value, json};

use crate::client::Ticket;
use crate::output::timeseries::{TICKETS_CREATED, daily_counts};
use crate::output::{GrafanaTarget, TimeSeries, format_table};
use crate::server::{AppState, HttpError};
use crate::service::{TicketStatistics, compute_statistics};

/// `GET /grafana-native/`
pub async fn info() -> Json<Value> {
    Json(json!({
        "message": "Grafana native API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "query": "POST /query - Query endpoint",
            "search": "GET /search - Search available metrics",
        }
    }))
}

/// Target references from a `{targets: [{target | refId, type}]}` body.
///
/// Anything unparseable yields no targets. A target without `target` or
/// `refId` is treated as `A`.
pub fn target_refs(body: &[u8]) -> Vec<String> {
    let parsed: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring unparseable query body: {}", e);
            return Vec::new();
        }
    };

    parsed
        .get("targets")
        .and_then(Value::as_array)
        .map(|targets| {
            targets
                .iter()
                .map(|t| {
                    t.get("target")
                        .and_then(Value::as_str)
                        .or_else(|| t.get("refId").and_then(Value::as_str))
                        .unwrap_or("A")
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Tickets fetched at most once per request
struct Snapshot<'a> {
    state: &'a AppState,
    tickets: Option<Vec<Ticket>>,
}

impl<'a> Snapshot<'a> {
    fn new(state: &'a AppState) -> Self {
        Self {
            state,
            tickets: None,
        }
    }

    async fn tickets(&mut self) -> Result<&[Ticket], HttpError> {
        if self.tickets.is_none() {
            let tickets = self
                .state
                .service
                .all_tickets()
                .await
                .map_err(|e| HttpError::service("Error processing query", e))?;
            self.tickets = Some(tickets);
        }
        Ok(self.tickets.as_deref().unwrap_or_default())
    }

    async fn statistics(&mut self) -> Result<TicketStatistics, HttpError> {
        Ok(compute_statistics(self.tickets().await?))
    }
}

/// `POST /grafana-native/query`
pub async fn query(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Value>>, HttpError> {
    let mut snapshot = Snapshot::new(&state);
    let mut results = Vec::new();

    for reference in target_refs(&body) {
        let Some(target) = GrafanaTarget::from_native(&reference) else {
            continue;
        };

        let payload = match target {
            GrafanaTarget::TicketsTimeseries => {
                let datapoints = daily_counts(snapshot.tickets().await?);
                json!(TimeSeries::new(TICKETS_CREATED, datapoints))
            }
            GrafanaTarget::TicketsByState => {
                let stats = snapshot.statistics().await?;
                table_payload(target, format_table("State", &stats.tickets_by_state))
            }
            GrafanaTarget::TicketsByPriority => {
                let stats = snapshot.statistics().await?;
                table_payload(target, format_table("Priority", &stats.tickets_by_priority))
            }
            scalar => {
                let stats = snapshot.statistics().await?;
                json!(TimeSeries::single_point(
                    scalar.series_label(),
                    scalar.scalar(&stats).unwrap_or_default(),
                    Utc::now(),
                ))
            }
        };
        results.push(payload);
    }

    Ok(Json(results))
}

fn table_payload(target: GrafanaTarget, table: crate::output::Table) -> Value {
    json!({
        "target": target.series_label(),
        "datapoints": [],
        "table": table,
    })
}
