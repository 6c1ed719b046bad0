//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee entity
///
/// `password_hash` never leaves the server: it is skipped on serialization
/// and re-read from the store when verifying a login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: String,
    pub restaurant_id: String,
    pub username: String,
    pub display_name: String,
    /// Argon2 PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role_id: String,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub role_id: String,
}

/// Update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
