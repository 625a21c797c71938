//! Ticket models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket snapshot as returned by the Zammad API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket ID
    pub id: i64,

    /// Human-facing ticket number (Zammad sends a string, some installs an integer)
    #[serde(default, deserialize_with = "deserialize_number")]
    pub number: Option<String>,

    /// Ticket title
    #[serde(default)]
    pub title: Option<String>,

    /// State name (e.g. "open", "closed", "pending reminder")
    #[serde(default)]
    pub state: Option<String>,

    /// Priority name (e.g. "2 normal")
    #[serde(default)]
    pub priority: Option<String>,

    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Customer (user) ID
    #[serde(default)]
    pub customer_id: Option<i64>,

    /// Organization ID
    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// Accepts the ticket number as either a JSON string or integer.
fn deserialize_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberValue {
        Integer(i64),
        String(String),
    }

    Ok(Option::<NumberValue>::deserialize(deserializer)?.map(|v| match v {
        NumberValue::Integer(i) => i.to_string(),
        NumberValue::String(s) => s,
    }))
}
