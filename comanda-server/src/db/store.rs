//! In-process row store with a post-commit change feed
//!
//! Rows are JSON objects carrying at least `id` and `restaurant_id`. All
//! writes go through a single-writer transaction: the closure stages
//! changes against a consistent view, and only when it returns `Ok` are
//! they applied and the corresponding [`ChangeEvent`]s published. An error
//! anywhere in the closure applies nothing — this is the transactional
//! boundary that keeps Order + KitchenTicket creation atomic.
//!
//! Concurrent writers serialize on the table lock; the committed result is
//! last-write-wins, and any validation a closure performs (e.g. transition
//! legality) runs against the row image the winning write will replace.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use serde_json::Value;
use shared::ticket::{ChangeEvent, ChangeEventType};

use crate::feed::ChangeFeed;

/// Store-level failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Row not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Malformed row: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Row filter: restaurant scope plus exact-match conditions
#[derive(Debug, Clone)]
pub struct Filter {
    restaurant_id: String,
    eq: Vec<(String, Value)>,
}

impl Filter {
    /// Scope to one restaurant; every query starts here
    pub fn restaurant(restaurant_id: &str) -> Self {
        Self {
            restaurant_id: restaurant_id.to_string(),
            eq: Vec::new(),
        }
    }

    /// Add an exact-match condition on a top-level field
    pub fn and_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.eq.push((field.to_string(), value.into()));
        self
    }

    fn matches(&self, row: &Value) -> bool {
        if row.get("restaurant_id").and_then(Value::as_str) != Some(self.restaurant_id.as_str()) {
            return false;
        }
        self.eq
            .iter()
            .all(|(field, expected)| row.get(field) == Some(expected))
    }
}

/// Result ordering by `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sort {
    #[default]
    NewestFirst,
    OldestFirst,
}

type Tables = HashMap<String, BTreeMap<String, Value>>;

#[derive(Debug)]
struct Pending {
    table: String,
    id: String,
    event: ChangeEventType,
    old: Option<Value>,
    new: Value,
}

/// Staged changes within one transaction
///
/// Reads see staged-but-uncommitted writes from the same transaction.
pub struct Txn<'a> {
    base: &'a Tables,
    pending: Vec<Pending>,
}

impl<'a> Txn<'a> {
    fn new(base: &'a Tables) -> Self {
        Self {
            base,
            pending: Vec::new(),
        }
    }

    /// Read a row: staged image if this transaction touched it, committed
    /// image otherwise. Deleted-in-txn rows read as absent.
    pub fn get(&self, table: &str, id: &str) -> Option<Value> {
        if let Some(p) = self
            .pending
            .iter()
            .rev()
            .find(|p| p.table == table && p.id == id)
        {
            return match p.event {
                ChangeEventType::Delete => None,
                _ => Some(p.new.clone()),
            };
        }
        self.base.get(table).and_then(|t| t.get(id)).cloned()
    }

    /// Read a row scoped to a restaurant
    pub fn get_scoped(&self, table: &str, restaurant_id: &str, id: &str) -> Option<Value> {
        self.get(table, id)
            .filter(|row| row.get("restaurant_id").and_then(Value::as_str) == Some(restaurant_id))
    }

    /// Stage an insert. The row must be an object with string `id` and
    /// `restaurant_id`; a duplicate id is a conflict.
    pub fn insert(&mut self, table: &str, row: Value) -> StoreResult<Value> {
        let id = require_key(&row, "id")?;
        require_key(&row, "restaurant_id")?;

        if self.get(table, &id).is_some() {
            return Err(StoreError::Conflict(format!(
                "{} id {} already exists",
                table, id
            )));
        }

        self.pending.push(Pending {
            table: table.to_string(),
            id,
            event: ChangeEventType::Insert,
            old: None,
            new: row.clone(),
        });
        Ok(row)
    }

    /// Stage an update through a mutation closure run against the current
    /// image. The closure may fail, aborting the whole transaction.
    pub fn update(
        &mut self,
        table: &str,
        restaurant_id: &str,
        id: &str,
        mutate: impl FnOnce(&mut Value) -> StoreResult<()>,
    ) -> StoreResult<Value> {
        let old = self
            .get_scoped(table, restaurant_id, id)
            .ok_or_else(|| StoreError::NotFound(format!("{} id {}", table, id)))?;

        let mut new = old.clone();
        mutate(&mut new)?;

        self.pending.push(Pending {
            table: table.to_string(),
            id: id.to_string(),
            event: ChangeEventType::Update,
            old: Some(old),
            new: new.clone(),
        });
        Ok(new)
    }

    /// Stage a delete
    pub fn delete(&mut self, table: &str, restaurant_id: &str, id: &str) -> StoreResult<Value> {
        let old = self
            .get_scoped(table, restaurant_id, id)
            .ok_or_else(|| StoreError::NotFound(format!("{} id {}", table, id)))?;

        self.pending.push(Pending {
            table: table.to_string(),
            id: id.to_string(),
            event: ChangeEventType::Delete,
            old: Some(old.clone()),
            new: old.clone(),
        });
        Ok(old)
    }
}

fn require_key(row: &Value, key: &str) -> StoreResult<String> {
    row.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::Malformed(format!("row is missing string field '{}'", key)))
}

/// The row store
#[derive(Debug)]
pub struct Store {
    tables: RwLock<Tables>,
    feed: ChangeFeed,
}

impl Store {
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            feed,
        }
    }

    /// Run a closure as one transaction
    ///
    /// On `Ok` every staged change is applied under the write lock and then
    /// published to the feed, in staging order. On `Err` nothing happens.
    /// The error type is the caller's, so domain checks inside the closure
    /// abort the transaction without remapping.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&mut Txn) -> Result<T, E>) -> Result<T, E> {
        let mut guard = self.tables.write();

        let (result, pending) = {
            let mut txn = Txn::new(&guard);
            let result = f(&mut txn)?;
            (result, txn.pending)
        };

        for p in &pending {
            let table = guard.entry(p.table.clone()).or_default();
            match p.event {
                ChangeEventType::Insert | ChangeEventType::Update => {
                    table.insert(p.id.clone(), p.new.clone());
                }
                ChangeEventType::Delete => {
                    table.remove(&p.id);
                }
            }
        }

        // Publish while still holding the write lock so events leave in
        // commit order; `broadcast::send` never blocks. Post-commit images
        // only: subscribers can never observe a row the store has not
        // accepted.
        for p in pending {
            let restaurant_id = p
                .new
                .get("restaurant_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            self.feed.publish(ChangeEvent {
                table: p.table,
                event_type: p.event,
                restaurant_id,
                new: p.new,
                old: p.old,
            });
        }

        Ok(result)
    }

    /// Select rows matching a filter, sorted by `created_at`
    pub fn select(
        &self,
        table: &str,
        filter: &Filter,
        sort: Sort,
        limit: Option<usize>,
    ) -> Vec<Value> {
        let guard = self.tables.read();
        let mut rows: Vec<Value> = guard
            .get(table)
            .map(|t| t.values().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default();
        drop(guard);

        rows.sort_by_key(|r| r.get("created_at").and_then(Value::as_i64).unwrap_or(0));
        if sort == Sort::NewestFirst {
            rows.reverse();
        }
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows
    }

    /// Read one row scoped to a restaurant
    pub fn get(&self, table: &str, restaurant_id: &str, id: &str) -> Option<Value> {
        let guard = self.tables.read();
        guard
            .get(table)
            .and_then(|t| t.get(id))
            .filter(|row| row.get("restaurant_id").and_then(Value::as_str) == Some(restaurant_id))
            .cloned()
    }

    /// Insert one row (single-op transaction)
    pub fn insert_row(&self, table: &str, row: Value) -> StoreResult<Value> {
        self.transaction(|txn| txn.insert(table, row))
    }

    /// Shallow-merge an object patch into a row and bump `updated_at`
    pub fn update_row(
        &self,
        table: &str,
        restaurant_id: &str,
        id: &str,
        patch: Value,
    ) -> StoreResult<Value> {
        self.transaction(|txn| {
            txn.update(table, restaurant_id, id, |row| {
                merge_patch(row, &patch);
                Ok(())
            })
        })
    }

    /// Delete one row (single-op transaction)
    pub fn delete_row(&self, table: &str, restaurant_id: &str, id: &str) -> StoreResult<Value> {
        self.transaction(|txn| txn.delete(table, restaurant_id, id))
    }

    /// Count rows matching a filter
    pub fn count(&self, table: &str, filter: &Filter) -> usize {
        let guard = self.tables.read();
        guard
            .get(table)
            .map(|t| t.values().filter(|r| filter.matches(r)).count())
            .unwrap_or(0)
    }
}

/// Copy the patch object's fields over the row and stamp `updated_at`
fn merge_patch(row: &mut Value, patch: &Value) {
    if let (Some(row_obj), Some(patch_obj)) = (row.as_object_mut(), patch.as_object()) {
        for (k, v) in patch_obj {
            row_obj.insert(k.clone(), v.clone());
        }
        row_obj.insert(
            "updated_at".to_string(),
            Value::from(shared::util::now_millis()),
        );
    }
}
