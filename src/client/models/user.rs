//! User models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Zammad user (agent or customer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: i64,

    /// Login name
    #[serde(default)]
    pub login: Option<String>,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    /// User email address
    #[serde(default)]
    pub email: Option<String>,

    /// Whether the account is active
    #[serde(default)]
    pub active: Option<bool>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_with_unknown_fields() {
        let json = r#"{
            "id": 9,
            "login": "nicole.braun@zammad.org",
            "firstname": "Nicole",
            "lastname": "Braun",
            "email": "nicole.braun@zammad.org",
            "active": true,
            "role_ids": [3],
            "created_at": "2023-11-20T08:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, 9);
        assert_eq!(user.firstname.as_deref(), Some("Nicole"));
        assert_eq!(user.active, Some(true));
        assert!(user.updated_at.is_none());
    }
}
