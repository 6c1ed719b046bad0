//! Row normalization
//!
//! Feed payloads cross a serialization boundary, so a view must survive
//! rows it cannot fully parse. A well-formed row deserializes directly;
//! anything else is salvaged field by field with safe defaults. Only a row
//! with no usable identity is dropped.

use serde_json::Value;
use shared::ticket::{KitchenTicket, TicketItem, TicketStatus};
use shared::util::now_millis;
use tracing::warn;

/// Parse a ticket row, repairing what can be repaired
///
/// Returns `None` only when `id` or `restaurant_id` is missing; every other
/// defect gets a default: unparseable status falls back to `NEW`, items
/// without a name become "Unknown item", quantity defaults to 1, price
/// to 0.
pub fn ticket_from_row(row: &Value) -> Option<KitchenTicket> {
    if let Ok(ticket) = serde_json::from_value::<KitchenTicket>(row.clone()) {
        return Some(ticket);
    }

    let id = row.get("id").and_then(Value::as_str)?.to_string();
    let restaurant_id = row.get("restaurant_id").and_then(Value::as_str)?.to_string();

    warn!(ticket_id = %id, "Normalizing malformed ticket row");

    let status = row
        .get("status")
        .and_then(|s| serde_json::from_value::<TicketStatus>(s.clone()).ok())
        .unwrap_or_default();

    let items = row
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_item).collect())
        .unwrap_or_default();

    let now = now_millis();
    Some(KitchenTicket {
        id,
        restaurant_id,
        source: row
            .get("source")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        items,
        status,
        status_history: row
            .get("status_history")
            .and_then(|h| serde_json::from_value(h.clone()).ok())
            .unwrap_or_default(),
        order_id: row
            .get("order_id")
            .and_then(Value::as_str)
            .map(str::to_string),
        created_at: row.get("created_at").and_then(Value::as_i64).unwrap_or(now),
        updated_at: row.get("updated_at").and_then(Value::as_i64).unwrap_or(now),
    })
}

fn normalize_item(raw: &Value) -> TicketItem {
    TicketItem {
        name: raw
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown item")
            .to_string(),
        quantity: raw
            .get("quantity")
            .and_then(Value::as_i64)
            .filter(|q| *q > 0)
            .unwrap_or(1) as i32,
        price: raw
            .get("price")
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite() && *p >= 0.0)
            .unwrap_or(0.0),
        note: raw.get("note").and_then(Value::as_str).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_row_passes_through() {
        let ticket = KitchenTicket::new("r1".into(), "Table 1".into(), vec![]);
        let row = serde_json::to_value(&ticket).unwrap();
        let parsed = ticket_from_row(&row).unwrap();
        assert_eq!(parsed, ticket);
    }

    #[test]
    fn test_missing_identity_drops_row() {
        assert!(ticket_from_row(&json!({ "restaurant_id": "r1" })).is_none());
        assert!(ticket_from_row(&json!({ "id": "t1" })).is_none());
    }

    #[test]
    fn test_malformed_items_get_defaults() {
        let row = json!({
            "id": "t1",
            "restaurant_id": "r1",
            "status": "BOGUS",
            "items": [
                { "quantity": 2 },
                { "name": "", "price": -3.0 },
                { "name": "Cola", "quantity": 0, "price": 40.0 }
            ]
        });
        let ticket = ticket_from_row(&row).unwrap();
        assert_eq!(ticket.status, TicketStatus::New);
        assert_eq!(ticket.items[0].name, "Unknown item");
        assert_eq!(ticket.items[0].quantity, 2);
        assert_eq!(ticket.items[1].name, "Unknown item");
        assert_eq!(ticket.items[1].price, 0.0);
        assert_eq!(ticket.items[2].quantity, 1);
        assert_eq!(ticket.items[2].price, 40.0);
    }

    #[test]
    fn test_missing_timestamps_defaulted() {
        let row = json!({ "id": "t1", "restaurant_id": "r1" });
        let ticket = ticket_from_row(&row).unwrap();
        assert!(ticket.created_at > 0);
        assert!(ticket.items.is_empty());
        assert_eq!(ticket.source, "");
    }
}
