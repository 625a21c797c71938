//! Query dispatch
//!
//! Maps the free-text metric expressions and target names sent by dashboards
//! onto aggregates. This is keyword classification, not a PromQL parser.

use std::collections::BTreeMap;

use crate::service::TicketStatistics;

/// Metric families exposed by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFamily {
    Total,
    Open,
    Closed,
    ByState,
    ByPriority,
}

impl MetricFamily {
    /// Every family, in exposition order.
    pub const ALL: [MetricFamily; 5] = [
        MetricFamily::Total,
        MetricFamily::Open,
        MetricFamily::Closed,
        MetricFamily::ByState,
        MetricFamily::ByPriority,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricFamily::Total => "zammad_tickets_total",
            MetricFamily::Open => "zammad_tickets_open",
            MetricFamily::Closed => "zammad_tickets_closed",
            MetricFamily::ByState => "zammad_tickets_by_state",
            MetricFamily::ByPriority => "zammad_tickets_by_priority",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            MetricFamily::Total => "Total number of tickets",
            MetricFamily::Open => "Number of tickets whose state is not closed",
            MetricFamily::Closed => "Number of closed tickets",
            MetricFamily::ByState => "Number of tickets per state",
            MetricFamily::ByPriority => "Number of tickets per priority",
        }
    }

    /// Label carried by grouped families.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            MetricFamily::ByState => Some("state"),
            MetricFamily::ByPriority => Some("priority"),
            _ => None,
        }
    }

    /// All metric names, for label-value discovery.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.name()).collect()
    }

    /// Samples of this family for the given statistics.
    pub fn samples(&self, stats: &TicketStatistics) -> Vec<Sample> {
        match self {
            MetricFamily::Total => vec![Sample::new(self.name(), stats.total_tickets)],
            MetricFamily::Open => vec![Sample::new(self.name(), stats.open_tickets)],
            MetricFamily::Closed => vec![Sample::new(self.name(), stats.closed_tickets)],
            MetricFamily::ByState => grouped(self, &stats.tickets_by_state),
            MetricFamily::ByPriority => grouped(self, &stats.tickets_by_priority),
        }
    }
}

fn grouped(family: &MetricFamily, counts: &BTreeMap<String, u64>) -> Vec<Sample> {
    let label = family.label().unwrap_or_default();
    counts
        .iter()
        .map(|(key, count)| Sample::new(family.name(), *count).with_label(label, key))
        .collect()
}

/// One labelled value, the unit shared by the exposition and query formatters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Label set including `__name__`
    pub metric: BTreeMap<String, String>,
    pub value: u64,
}

impl Sample {
    pub fn new(name: &str, value: u64) -> Self {
        let mut metric = BTreeMap::new();
        metric.insert("__name__".to_string(), name.to_string());
        Self { metric, value }
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.metric.insert(key.to_string(), value.to_string());
        self
    }

    pub fn name(&self) -> &str {
        self.metric.get("__name__").map(String::as_str).unwrap_or_default()
    }
}

/// Families mentioned anywhere in a query expression.
///
/// `sum(zammad_tickets_open) / zammad_tickets_total` selects both families;
/// an expression naming none of them selects nothing.
pub fn select_families(query: &str) -> Vec<MetricFamily> {
    MetricFamily::ALL
        .into_iter()
        .filter(|family| query.contains(family.name()))
        .collect()
}

/// Evaluate a query expression against the statistics.
pub fn evaluate(query: &str, stats: &TicketStatistics) -> Vec<Sample> {
    select_families(query)
        .iter()
        .flat_map(|family| family.samples(stats))
        .collect()
}

/// Targets understood by the Grafana JSON datasources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrafanaTarget {
    TicketsTimeseries,
    TicketsByState,
    TicketsByPriority,
    TotalTickets,
    OpenTickets,
    ClosedTickets,
}

impl GrafanaTarget {
    pub const ALL: [GrafanaTarget; 6] = [
        GrafanaTarget::TicketsTimeseries,
        GrafanaTarget::TicketsByState,
        GrafanaTarget::TicketsByPriority,
        GrafanaTarget::TotalTickets,
        GrafanaTarget::OpenTickets,
        GrafanaTarget::ClosedTickets,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GrafanaTarget::TicketsTimeseries => "tickets_timeseries",
            GrafanaTarget::TicketsByState => "tickets_by_state",
            GrafanaTarget::TicketsByPriority => "tickets_by_priority",
            GrafanaTarget::TotalTickets => "total_tickets",
            GrafanaTarget::OpenTickets => "open_tickets",
            GrafanaTarget::ClosedTickets => "closed_tickets",
        }
    }

    /// Names listed by the `/search` endpoint.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.name()).collect()
    }

    /// Simple-JSON dispatch: exact names, an empty target means the time series.
    pub fn from_simple(target: Option<&str>) -> Option<Self> {
        match target.map(str::trim) {
            None | Some("") => Some(GrafanaTarget::TicketsTimeseries),
            Some(name) => Self::ALL.into_iter().find(|t| t.name() == name),
        }
    }

    /// Native dispatch: exact names first, then case-insensitive keywords.
    pub fn from_native(target: &str) -> Option<Self> {
        if let Some(exact) = Self::ALL.into_iter().find(|t| t.name() == target) {
            return Some(exact);
        }

        let lowered = target.to_lowercase();
        if lowered.contains("timeseries") {
            Some(GrafanaTarget::TicketsTimeseries)
        } else if lowered.contains("state") {
            Some(GrafanaTarget::TicketsByState)
        } else if lowered.contains("priority") {
            Some(GrafanaTarget::TicketsByPriority)
        } else {
            None
        }
    }

    /// Display name of the series or table produced for this target.
    pub fn series_label(&self) -> &'static str {
        match self {
            GrafanaTarget::TicketsTimeseries => "Tickets Created",
            GrafanaTarget::TicketsByState => "Tickets by State",
            GrafanaTarget::TicketsByPriority => "Tickets by Priority",
            GrafanaTarget::TotalTickets => "Total Tickets",
            GrafanaTarget::OpenTickets => "Open Tickets",
            GrafanaTarget::ClosedTickets => "Closed Tickets",
        }
    }

    /// Scalar value for the single-number targets.
    pub fn scalar(&self, stats: &TicketStatistics) -> Option<u64> {
        match self {
            GrafanaTarget::TotalTickets => Some(stats.total_tickets),
            GrafanaTarget::OpenTickets => Some(stats.open_tickets),
            GrafanaTarget::ClosedTickets => Some(stats.closed_tickets),
            _ => None,
        }
    }
}
