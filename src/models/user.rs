//! User model mirrored from the auth backend / data API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Role tag for accounts with administrative privileges.
pub const ROLE_ADMIN: &str = "admin";
/// Status tag for accounts in good standing.
pub const STATUS_ACTIVE: &str = "active";

/// User account as served by the backend.
///
/// The record is open: fields this type does not know about are kept in
/// `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Opaque unique identifier
    pub id: String,
    /// Email address
    pub email: String,
    /// Display name, if the user set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role tag (open-ended, e.g. "admin", "student")
    pub role: String,
    /// Account status tag (e.g. "active", "suspended")
    pub status: String,
    /// Number of courses the user is enrolled in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses_enrolled: Option<u32>,
    /// Number of courses the user has completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses_completed: Option<u32>,
    /// Last activity timestamp (ISO 8601)
    pub last_active: String,
    /// Any additional attributes the backend attached
    #[serde(flatten)]
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ROLE_ADMIN)
    }

    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_ACTIVE)
    }

    /// Name to show in the UI, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// `last_active` as a timestamp; `None` if the backend sent something
    /// that isn't RFC 3339.
    pub fn last_active_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_active)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Look up an attribute that is not part of the typed schema.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": "u_1",
            "email": "ada@example.com",
            "name": "Ada",
            "role": "admin",
            "status": "active",
            "courses_enrolled": 4,
            "last_active": "2026-03-01T10:00:00Z",
            "department": "math",
            "badges": ["early-bird"]
        })
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let user: User = serde_json::from_value(sample()).unwrap();

        assert_eq!(user.attribute("department"), Some(&json!("math")));
        assert_eq!(user.attribute("badges"), Some(&json!(["early-bird"])));
        assert_eq!(user.courses_enrolled, Some(4));
        assert_eq!(user.courses_completed, None);

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("email");
        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_role_and_status_helpers() {
        let mut user: User = serde_json::from_value(sample()).unwrap();
        assert!(user.is_admin());
        assert!(user.is_active());

        user.role = "student".to_string();
        user.status = "suspended".to_string();
        assert!(!user.is_admin());
        assert!(!user.is_active());
    }

    #[test]
    fn test_last_active_at_parses_rfc3339() {
        let mut user: User = serde_json::from_value(sample()).unwrap();
        let expected = DateTime::parse_from_rfc3339("2026-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(user.last_active_at(), Some(expected));

        user.last_active = "2026-03-01T12:00:00+02:00".to_string();
        assert_eq!(user.last_active_at(), Some(expected));

        user.last_active = "yesterday".to_string();
        assert_eq!(user.last_active_at(), None);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user: User = serde_json::from_value(sample()).unwrap();
        assert_eq!(user.display_name(), "Ada");
        user.name = Some("  ".to_string());
        assert_eq!(user.display_name(), "ada@example.com");
        user.name = None;
        assert_eq!(user.display_name(), "ada@example.com");
    }
}
