//! Inventory Item Model

use serde::{Deserialize, Serialize};

/// Inventory item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    /// Unit of measure, e.g. "kg" or "pcs"
    pub unit: String,
    pub quantity: f64,
    /// Quantity at or below which the item shows up in the low-stock report
    pub low_stock_threshold: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InventoryItem {
    pub fn is_low(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

/// Create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    #[serde(default)]
    pub low_stock_threshold: f64,
}

/// Update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<f64>,
}
