//! Role Model
//!
//! Roles gate which UI components an employee may use. Built-in roles ship
//! with `deletable = false` and can never be modified or removed.

use serde::{Deserialize, Serialize};

/// Role entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    /// UI component ids (UUIDs) this role may access
    pub components: Vec<String>,
    /// Built-in roles are not deletable or editable
    pub deletable: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Action carried by the role-management endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoleAction {
    Create,
    Update,
    Delete,
}

/// Request body for `POST /api/roles/manage`
///
/// Shape depends on the action: `create` needs `name` (+ optional
/// `components`), `update`/`delete` need `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleManageRequest {
    pub action: RoleAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
}
