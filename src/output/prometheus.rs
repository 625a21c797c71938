//! Prometheus HTTP query API payloads
//!
//! Instant queries answer with a `vector`, range queries with a `matrix`.
//! Nothing is retained between requests, so a range is filled with the
//! current value repeated at every step.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::query::Sample;

/// Step used when the request carries none
pub const DEFAULT_STEP_SECS: i64 = 15;

/// Window used when the request carries no start
pub const DEFAULT_RANGE_SECS: i64 = 3600;

/// Upper bound on points per series, same as Prometheus
pub const MAX_POINTS_PER_SERIES: i64 = 11_000;

/// `{status: "success", data}` envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// `{status: "error", errorType, error}` envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub status: &'static str,
    pub error_type: String,
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error_type: &str, error: impl Into<String>) -> Self {
        Self {
            status: "error",
            error_type: error_type.to_string(),
            error: error.into(),
        }
    }
}

/// `{resultType, result}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryData<R> {
    pub result_type: &'static str,
    pub result: Vec<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorSample {
    pub metric: BTreeMap<String, String>,
    /// `[unix_seconds, "value"]`
    pub value: (i64, String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixSeries {
    pub metric: BTreeMap<String, String>,
    /// `[[unix_seconds, "value"], ...]`
    pub values: Vec<(i64, String)>,
}

/// Instant query result stamped at `at`.
pub fn vector(samples: Vec<Sample>, at: DateTime<Utc>) -> QueryData<VectorSample> {
    let ts = at.timestamp();
    QueryData {
        result_type: "vector",
        result: samples
            .into_iter()
            .map(|s| VectorSample {
                metric: s.metric,
                value: (ts, s.value.to_string()),
            })
            .collect(),
    }
}

/// Range query result: each sample's value repeated across the range.
pub fn matrix(samples: Vec<Sample>, range: &TimeRange) -> QueryData<MatrixSeries> {
    QueryData {
        result_type: "matrix",
        result: samples
            .into_iter()
            .map(|s| {
                let value = s.value.to_string();
                MatrixSeries {
                    metric: s.metric,
                    values: range.steps().map(|t| (t, value.clone())).collect(),
                }
            })
            .collect(),
    }
}

/// Empty result of the given type, for blank queries.
pub fn empty<R>(result_type: &'static str) -> QueryData<R> {
    QueryData {
        result_type,
        result: Vec::new(),
    }
}

/// Rejected range parameters (`bad_data`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeError(pub String);

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Evaluation window of a range query, in unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl TimeRange {
    /// Parse raw `start`, `end` and `step` parameters relative to `now`.
    pub fn parse(
        start: Option<&str>,
        end: Option<&str>,
        step: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, RangeError> {
        let end = match non_blank(end) {
            Some(raw) => parse_time(raw)?,
            None => now.timestamp(),
        };
        let start = match non_blank(start) {
            Some(raw) => parse_time(raw)?,
            None => end
                .checked_sub(DEFAULT_RANGE_SECS)
                .ok_or_else(|| RangeError("end timestamp out of range".to_string()))?,
        };
        let step = match non_blank(step) {
            Some(raw) => parse_step(raw)?,
            None => DEFAULT_STEP_SECS,
        };

        if end < start {
            return Err(RangeError(
                "end timestamp must not be before start time".to_string(),
            ));
        }
        let span = end
            .checked_sub(start)
            .ok_or_else(|| RangeError("time range out of bounds".to_string()))?;
        if span / step + 1 > MAX_POINTS_PER_SERIES {
            return Err(RangeError(format!(
                "exceeded maximum resolution of {} points per timeseries",
                MAX_POINTS_PER_SERIES
            )));
        }

        Ok(Self { start, end, step })
    }

    /// Timestamps from `start` to `end` inclusive, `step` apart.
    pub fn steps(&self) -> impl Iterator<Item = i64> + '_ {
        (self.start..=self.end).step_by(self.step as usize)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Unix seconds (integer or float) or RFC 3339.
///
/// Numbers outside the range chrono can represent are rejected.
pub fn parse_time(raw: &str) -> Result<i64, RangeError> {
    if let Ok(secs) = raw.parse::<f64>() {
        if secs.is_finite() {
            let secs = secs.floor() as i64;
            return DateTime::from_timestamp(secs, 0)
                .map(|dt| dt.timestamp())
                .ok_or_else(|| RangeError(format!("timestamp {:?} out of range", raw)));
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp())
        .map_err(|_| RangeError(format!("cannot parse {:?} to a valid timestamp", raw)))
}

/// Bare seconds (`30`, `7.5`) or a duration with `s`, `m`, `h` or `d` suffix.
pub fn parse_step(raw: &str) -> Result<i64, RangeError> {
    let invalid = || RangeError(format!("cannot parse {:?} to a valid duration", raw));

    let (number, multiplier) = match raw.char_indices().last() {
        Some((idx, 's')) => (&raw[..idx], 1.0),
        Some((idx, 'm')) => (&raw[..idx], 60.0),
        Some((idx, 'h')) => (&raw[..idx], 3600.0),
        Some((idx, 'd')) => (&raw[..idx], 86400.0),
        _ => (raw, 1.0),
    };

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    let secs = (value * multiplier).floor();
    if !secs.is_finite() || secs < 1.0 {
        return Err(RangeError(
            "zero or negative query resolution step widths are not accepted".to_string(),
        ));
    }

    Ok(secs as i64)
}
