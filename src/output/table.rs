//! Table output for the Grafana JSON datasources

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column description: `{text, type}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TableColumn {
    fn new(text: &str, kind: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// `{columns, rows, type: "table"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    /// `[category, count]` rows
    pub rows: Vec<(String, u64)>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Two-column table (category label, count) from a count map.
pub fn format_table(category: &str, counts: &BTreeMap<String, u64>) -> Table {
    Table {
        columns: vec![
            TableColumn::new(category, "string"),
            TableColumn::new("Count", "number"),
        ],
        rows: counts.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        kind: "table".to_string(),
    }
}

/// Flat rows `[{<key>: category, "count": n}]` for the simple by-state and
/// by-priority endpoints.
pub fn format_rows(key: &str, counts: &BTreeMap<String, u64>) -> Vec<Map<String, Value>> {
    counts
        .iter()
        .map(|(category, count)| {
            let mut row = Map::new();
            row.insert(key.to_string(), Value::from(category.clone()));
            row.insert("count".to_string(), Value::from(*count));
            row
        })
        .collect()
}
