//! Dashboard output formats
//!
//! Stateless translators from tickets and statistics into the wire shapes
//! consumed by Grafana and Prometheus.

pub mod exposition;
pub mod prometheus;
pub mod query;
pub mod table;
pub mod timeseries;

pub use query::{GrafanaTarget, MetricFamily, Sample};
pub use table::{Table, format_rows, format_table};
pub use timeseries::{TimeSeries, tickets_created};
