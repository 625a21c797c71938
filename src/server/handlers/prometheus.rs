//! Prometheus exposition and query API
//!
//! Enough of the HTTP API for Grafana's built-in Prometheus datasource:
//! instant and range queries over the five `zammad_tickets_*` families plus
//! label discovery.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::output::exposition::{self, CONTENT_TYPE};
use crate::output::prometheus::{
    ApiResponse, MatrixSeries, QueryData, TimeRange, VectorSample, empty, matrix, parse_time,
    vector,
};
use crate::output::query::{MetricFamily, evaluate, select_families};
use crate::server::{AppState, HttpError, PromError};
use crate::service::TicketStatistics;

/// Values served for `state` label discovery
pub const STATE_LABEL_VALUES: [&str; 4] = ["open", "closed", "pending", "merged"];

/// Values served for `priority` label discovery
pub const PRIORITY_LABEL_VALUES: [&str; 4] = ["low", "normal", "high", "critical"];

/// Query API parameters, from the query string and/or the POST body
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct QueryParams {
    pub query: Option<String>,
    pub time: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub step: Option<String>,
}

impl QueryParams {
    /// Fields set in `other` replace ours.
    pub fn merge(self, other: QueryParams) -> Self {
        Self {
            query: other.query.or(self.query),
            time: other.time.or(self.time),
            start: other.start.or(self.start),
            end: other.end.or(self.end),
            step: other.step.or(self.step),
        }
    }

    fn from_json(value: &Value) -> Self {
        let field = |name: &str| match value.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            query: field("query"),
            time: field("time"),
            start: field("start"),
            end: field("end"),
            step: field("step"),
        }
    }

    /// Parse a POST body as JSON or form data, depending on its content type.
    /// Unparseable bodies yield `None`.
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> Option<Self> {
        if body.is_empty() {
            return None;
        }

        let is_json = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        let parsed = if is_json {
            serde_json::from_slice::<Value>(body)
                .ok()
                .map(|v| Self::from_json(&v))
        } else {
            serde_urlencoded::from_bytes::<QueryParams>(body).ok()
        };

        if parsed.is_none() {
            warn!("Ignoring unparseable query body");
        }
        parsed
    }

    /// The trimmed query expression, if any.
    pub fn expression(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

fn request_params(query: QueryParams, headers: &HeaderMap, body: &[u8]) -> QueryParams {
    match QueryParams::from_body(headers, body) {
        Some(from_body) => query.merge(from_body),
        None => query,
    }
}

async fn statistics(state: &AppState) -> Result<TicketStatistics, PromError> {
    state
        .service
        .ticket_statistics()
        .await
        .map_err(PromError::service)
}

/// `GET /prometheus/`
pub async fn info() -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": {
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "metrics": "/api/v1/prometheus/metrics",
                "query": "/api/v1/prometheus/api/v1/query",
                "query_range": "/api/v1/prometheus/api/v1/query_range",
                "label_values": "/api/v1/prometheus/api/v1/label/__name__/values",
            }
        }
    }))
}

/// `GET /prometheus/metrics`
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, HttpError> {
    let stats = state
        .service
        .ticket_statistics()
        .await
        .map_err(|e| HttpError::service("Error collecting metrics", e))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, CONTENT_TYPE)],
        exposition::render_metrics(&stats),
    ))
}

/// `GET|POST /prometheus/api/v1/query`
pub async fn instant_query(
    State(state): State<AppState>,
    Query(query): Query<QueryParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<QueryData<VectorSample>>>, PromError> {
    let params = request_params(query, &headers, &body);

    let at = match params.time.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(raw) => DateTime::from_timestamp(parse_time(raw)?, 0)
            .ok_or_else(|| PromError::bad_data("evaluation time out of range"))?,
        None => Utc::now(),
    };

    let Some(expression) = params.expression() else {
        return Ok(Json(ApiResponse::success(empty("vector"))));
    };
    debug!("Instant query: {}", expression);

    if select_families(expression).is_empty() {
        return Ok(Json(ApiResponse::success(empty("vector"))));
    }

    let stats = statistics(&state).await?;
    Ok(Json(ApiResponse::success(vector(
        evaluate(expression, &stats),
        at,
    ))))
}

/// `GET|POST /prometheus/api/v1/query_range`
pub async fn range_query(
    State(state): State<AppState>,
    Query(query): Query<QueryParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<QueryData<MatrixSeries>>>, PromError> {
    let params = request_params(query, &headers, &body);

    let Some(expression) = params.expression() else {
        return Ok(Json(ApiResponse::success(empty("matrix"))));
    };
    debug!("Range query: {}", expression);

    let range = TimeRange::parse(
        params.start.as_deref(),
        params.end.as_deref(),
        params.step.as_deref(),
        Utc::now(),
    )?;

    if select_families(expression).is_empty() {
        return Ok(Json(ApiResponse::success(empty("matrix"))));
    }

    let stats = statistics(&state).await?;
    Ok(Json(ApiResponse::success(matrix(
        evaluate(expression, &stats),
        &range,
    ))))
}

/// `GET /prometheus/api/v1/labels`
pub async fn label_names() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(vec!["__name__", "priority", "state"]))
}

/// `GET /prometheus/api/v1/label/{label_name}/values`
pub async fn label_values(
    label_name: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<&'static str>>>, HttpError> {
    let Path(label_name) = label_name?;

    let values = match label_name.as_str() {
        "__name__" => MetricFamily::names(),
        "state" => STATE_LABEL_VALUES.to_vec(),
        "priority" => PRIORITY_LABEL_VALUES.to_vec(),
        _ => Vec::new(),
    };

    Ok(Json(ApiResponse::success(values)))
}
