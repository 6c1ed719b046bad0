//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table / room entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiningTable {
    pub id: String,
    pub restaurant_id: String,
    pub label: String,
    /// Zone or room the table sits in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub seats: i32,
    pub occupied: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub seats: i32,
}

/// Update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupied: Option<bool>,
}
