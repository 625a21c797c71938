//! HTTP error responses
//!
//! Plain endpoints answer `{"detail": "..."}`; the Prometheus query API
//! answers its own `{"status":"error", ...}` envelope.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde_json::json;

use crate::error::Error;
use crate::output::prometheus::{ApiErrorBody, RangeError};

/// Error returned by the plain JSON handlers
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub detail: String,
}

impl HttpError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        let err = Self::new(StatusCode::BAD_REQUEST, detail);
        warn!("Rejected request: {}", err.detail);
        err
    }

    /// Wrap a service failure: 502 for upstream errors, 500 otherwise.
    pub fn service(context: &str, err: Error) -> Self {
        let status = service_status(&err);
        error!("{}: {}", context, err);
        Self::new(status, format!("{}: {}", context, err))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        HttpError::bad_request(rejection.body_text())
    }
}

/// Error returned by the Prometheus query API handlers
#[derive(Debug)]
pub struct PromError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl PromError {
    pub fn bad_data(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("Rejected query: {}", message);
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody::new("bad_data", message),
        }
    }

    pub fn service(err: Error) -> Self {
        let status = service_status(&err);
        let error_type = if status == StatusCode::BAD_GATEWAY {
            "unavailable"
        } else {
            "internal"
        };
        error!("Query evaluation failed: {}", err);
        Self {
            status,
            body: ApiErrorBody::new(error_type, err.to_string()),
        }
    }
}

impl From<RangeError> for PromError {
    fn from(err: RangeError) -> Self {
        PromError::bad_data(err.0)
    }
}

impl IntoResponse for PromError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn service_status(err: &Error) -> StatusCode {
    match err {
        Error::Api(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
