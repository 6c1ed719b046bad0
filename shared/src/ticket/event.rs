//! Change feed events
//!
//! The feed delivers post-commit row images only: the `new` image on every
//! event already matches what the store has committed, so subscribers can
//! never observe a status the store disagrees with.

use serde::{Deserialize, Serialize};

/// Kind of row change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeEventType {
    Insert,
    Update,
    Delete,
}

/// One change on a store table, scoped to a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: String,
    pub event_type: ChangeEventType,
    pub restaurant_id: String,
    /// Post-commit row image (the deleted row for `Delete`)
    pub new: serde_json::Value,
    /// Previous image, when the store had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<serde_json::Value>,
}

impl ChangeEvent {
    /// Row id carried by the event, if the payload has one
    pub fn row_id(&self) -> Option<&str> {
        self.new.get("id").and_then(|v| v.as_str())
    }
}
