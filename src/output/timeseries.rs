//! Time-series output for the Grafana JSON datasources

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Ticket;

/// Series label for ticket creation counts
pub const TICKETS_CREATED: &str = "Tickets Created";

/// A Grafana series: `{target, datapoints: [[value, epoch_ms], ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub target: String,
    /// `[value, epoch_ms]` pairs, ascending by time
    pub datapoints: Vec<(u64, i64)>,
}

impl TimeSeries {
    pub fn new(target: impl Into<String>, datapoints: Vec<(u64, i64)>) -> Self {
        Self {
            target: target.into(),
            datapoints,
        }
    }

    /// A series holding one value at `at`.
    pub fn single_point(target: impl Into<String>, value: u64, at: DateTime<Utc>) -> Self {
        Self::new(target, vec![(value, at.timestamp_millis())])
    }
}

/// Count tickets per UTC creation day.
///
/// Each datapoint is stamped with the start of its day (00:00 UTC). Tickets
/// without a creation time are skipped.
pub fn daily_counts(tickets: &[Ticket]) -> Vec<(u64, i64)> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for created_at in tickets.iter().filter_map(|t| t.created_at) {
        *per_day.entry(created_at.date_naive()).or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .filter_map(|(day, count)| {
            let midnight = day.and_hms_opt(0, 0, 0)?.and_utc();
            Some((count, midnight.timestamp_millis()))
        })
        .collect()
}

/// The "Tickets Created" series list. Empty when no ticket has a creation time.
pub fn tickets_created(tickets: &[Ticket]) -> Vec<TimeSeries> {
    let datapoints = daily_counts(tickets);
    if datapoints.is_empty() {
        return Vec::new();
    }
    vec![TimeSeries::new(TICKETS_CREATED, datapoints)]
}
