//! Local user models.

use reconcile_framework::Field;
use serde::{Deserialize, Serialize};

/// State of a managed `n8n_user` resource.
///
/// `email` is required and fixed at creation. `role` is optional and may change in place.
/// Everything else is computed by the remote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserResourceModel {
    pub id: Field<String>,
    pub email: Field<String>,
    pub first_name: Field<String>,
    pub last_name: Field<String>,
    pub role: Field<String>,
    pub is_pending: Field<bool>,
    pub created_at: Field<String>,
    pub updated_at: Field<String>,
}

impl UserResourceModel {
    /// A declared user as the host plans it before creation.
    pub fn planned(email: &str, role: Option<&str>) -> Self {
        Self {
            id: Field::Unknown,
            email: email.into(),
            first_name: Field::Unknown,
            last_name: Field::Unknown,
            role: role.map_or(Field::Unknown, |role| Field::Known(role.to_string())),
            is_pending: Field::Unknown,
            created_at: Field::Unknown,
            updated_at: Field::Unknown,
        }
    }
}

/// Lookup of a single user by `id` or, failing that, by `email`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDataSourceModel {
    pub id: Field<String>,
    pub email: Field<String>,
    pub first_name: Field<String>,
    pub last_name: Field<String>,
    pub role: Field<String>,
    pub is_pending: Field<bool>,
    pub created_at: Field<String>,
    pub updated_at: Field<String>,
}

/// One entry of the `n8n_users` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserItem {
    pub id: Field<String>,
    pub email: Field<String>,
    pub first_name: Field<String>,
    pub last_name: Field<String>,
    pub role: Field<String>,
    pub is_pending: Field<bool>,
    pub created_at: Field<String>,
    pub updated_at: Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersDataSourceModel {
    /// Restricts the list to members of one project.
    pub project_id: Field<String>,
    /// `None` until the list has been read.
    pub users: Option<Vec<UserItem>>,
}
