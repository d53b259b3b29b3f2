//! Remote (JSON) representations of the n8n public API.
//!
//! These types mirror what the API sends and accepts. Field-level optionality follows the
//! API: a missing key is `None`, an explicit-nullable key is a [`Nullable`].

use chrono::{DateTime, Utc};
use reconcile_framework::Nullable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An id that the API sends either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{n}"),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for WireId {
    fn from(value: u64) -> Self {
        WireId::Number(value.into())
    }
}

impl From<&str> for WireId {
    fn from(value: &str) -> Self {
        WireId::Text(value.to_string())
    }
}

// --- Users ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// A user carrying only the mandatory email. Handy as a starting point in tests.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            first_name: None,
            last_name: None,
            is_pending: None,
            created_at: None,
            updated_at: None,
            role: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserList {
    #[serde(default)]
    pub data: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// One entry of the `POST /users` body (the API takes an array).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreateRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_accept_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
}

/// Result of `POST /users` for a single invitee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreateResponse {
    #[serde(default)]
    pub user: Option<CreatedUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UserCreateResponse {
    /// Accepts either a single result object or an array of them (first entry wins).
    pub fn from_body(body: serde_json::Value) -> Result<Self, serde_json::Error> {
        match body {
            serde_json::Value::Array(entries) => match entries.into_iter().next() {
                Some(first) => serde_json::from_value(first),
                None => Ok(Self::default()),
            },
            other => serde_json::from_value(other),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|user| user.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Body of `PATCH /users/{id}/role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleChange {
    pub new_role_name: String,
}

// --- Executions ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WireId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<WireId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub stopped_at: Nullable<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionList {
    #[serde(default)]
    pub data: Option<Vec<Execution>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_requires_email() {
        let missing = serde_json::from_value::<User>(json!({"id": "u1"}));
        assert!(missing.is_err());

        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@b.c",
            "isPending": false,
            "createdAt": "2024-01-02T03:04:05.000Z"
        }))
        .unwrap();
        assert_eq!(user.is_pending, Some(false));
        assert!(user.created_at.is_some());
        assert_eq!(user.role, None);
    }

    #[test]
    fn test_execution_ids_accept_numbers_and_strings() {
        let execution: Execution = serde_json::from_value(json!({
            "id": 1001,
            "workflowId": "wf-7",
            "stoppedAt": null
        }))
        .unwrap();
        assert_eq!(execution.id.unwrap().to_string(), "1001");
        assert_eq!(execution.workflow_id.unwrap().to_string(), "wf-7");
        assert_eq!(execution.stopped_at, Nullable::Null);

        let bare: Execution = serde_json::from_value(json!({})).unwrap();
        assert_eq!(bare.stopped_at, Nullable::Unset);
    }

    #[test]
    fn test_create_response_accepts_object_or_array() {
        let object = UserCreateResponse::from_body(json!({"user": {"id": "u9", "email": "a@b.c"}}))
            .unwrap();
        assert_eq!(object.user_id(), Some("u9"));

        let array =
            UserCreateResponse::from_body(json!([{"user": {"id": "u9"}, "error": ""}])).unwrap();
        assert_eq!(array.user_id(), Some("u9"));

        let empty = UserCreateResponse::from_body(json!([])).unwrap();
        assert_eq!(empty.user_id(), None);

        let blank = UserCreateResponse::from_body(json!({"user": {"id": ""}})).unwrap();
        assert_eq!(blank.user_id(), None);
    }

    #[test]
    fn test_create_request_omits_absent_role() {
        let body = serde_json::to_value(vec![UserCreateRequest {
            email: "a@b.c".into(),
            role: None,
        }])
        .unwrap();
        assert_eq!(body, json!([{"email": "a@b.c"}]));
    }
}
