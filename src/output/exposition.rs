//! Prometheus text exposition format
//!
//! `name value` and `name{label="x"} value` lines, each family preceded by
//! its `# HELP` and `# TYPE` lines.

use std::fmt::Write;

use super::query::{MetricFamily, Sample};
use crate::service::TicketStatistics;

/// Content type served on `/metrics`
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render every metric family for the given statistics.
pub fn render_metrics(stats: &TicketStatistics) -> String {
    let mut out = String::new();

    for family in MetricFamily::ALL {
        let _ = writeln!(out, "# HELP {} {}", family.name(), family.help());
        let _ = writeln!(out, "# TYPE {} gauge", family.name());
        for sample in family.samples(stats) {
            out.push_str(&render_sample(&sample));
            out.push('\n');
        }
    }

    out
}

/// One exposition line (without the trailing newline).
pub fn render_sample(sample: &Sample) -> String {
    let labels: Vec<String> = sample
        .metric
        .iter()
        .filter(|(key, _)| key.as_str() != "__name__")
        .map(|(key, value)| format!("{}=\"{}\"", key, escape_label_value(value)))
        .collect();

    if labels.is_empty() {
        format!("{} {}", sample.name(), sample.value)
    } else {
        format!("{}{{{}}} {}", sample.name(), labels.join(","), sample.value)
    }
}

/// Escape `\`, `"` and newlines in a label value.
pub fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_totals() {
        let stats = TicketStatistics {
            total_tickets: 5,
            open_tickets: 3,
            closed_tickets: 2,
            ..Default::default()
        };

        let text = render_metrics(&stats);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines.contains(&"zammad_tickets_total 5"));
        assert!(lines.contains(&"zammad_tickets_open 3"));
        assert!(lines.contains(&"zammad_tickets_closed 2"));
        assert!(lines.contains(&"# TYPE zammad_tickets_total gauge"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_grouped_lines() {
        let mut stats = TicketStatistics::default();
        stats.tickets_by_state.insert("pending reminder".to_string(), 4);
        stats.tickets_by_priority.insert("3 high".to_string(), 1);

        let text = render_metrics(&stats);

        assert!(text.contains("zammad_tickets_by_state{state=\"pending reminder\"} 4\n"));
        assert!(text.contains("zammad_tickets_by_priority{priority=\"3 high\"} 1\n"));
    }

    #[test]
    fn test_label_values_are_escaped() {
        let sample = Sample::new("zammad_tickets_by_state", 1).with_label("state", "say \"hi\"\\\n");
        assert_eq!(
            render_sample(&sample),
            r#"zammad_tickets_by_state{state="say \"hi\"\\\n"} 1"#
        );
    }
}
