//! Organization models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID
    pub id: i64,

    /// Organization name
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the organization is active
    #[serde(default)]
    pub active: Option<bool>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
