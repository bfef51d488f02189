use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// A role as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub code: String,
    pub role_name: String,
    #[serde(default)]
    pub normalized_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Permission identifiers. Order is irrelevant.
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_system: bool,

    // Audit
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_by_name: Option<String>,
}

/// Read-side projection of [`Role`] as returned by list and lookup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: String,
    pub code: String,
    pub role_name: String,
    #[serde(default)]
    pub normalized_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    #[serde(default)]
    pub permission_count: usize,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_by_name: Option<String>,
}

impl RoleDto {
    /// System roles are hidden from editing screens. Nothing else enforces it.
    pub fn is_editable(&self) -> bool {
        !self.is_system
    }
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            permission_count: role.permissions.len(),
            id: role.id,
            code: role.code,
            role_name: role.role_name,
            normalized_name: role.normalized_name,
            description: role.description,
            permissions: role.permissions,
            is_visible: role.is_visible,
            is_system: role.is_system,
            created_at: role.created_at,
            created_by: role.created_by,
            created_by_name: role.created_by_name,
            updated_at: role.updated_at,
            updated_by: role.updated_by,
            updated_by_name: role.updated_by_name,
        }
    }
}

/// Payload for creating or updating a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: String,

    #[validate(length(min = 1, max = 100))]
    pub role_name: String,

    #[serde(default)]
    pub permissions: BTreeSet<String>,

    #[serde(default)]
    pub is_visible: bool,

    #[validate(length(max = 500))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
