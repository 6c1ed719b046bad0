//! Entity models
//!
//! One file per store table. Each entity carries `id`, `restaurant_id` and
//! Unix-millis timestamps; create/update payloads live beside the entity.

mod customer;
mod dining_table;
mod employee;
mod inventory;
mod menu_item;
mod order;
mod role;

pub use customer::{Customer, CustomerCreate, CustomerUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use employee::{Employee, EmployeeCreate, EmployeeUpdate};
pub use inventory::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{CartSubmit, Order, OrderKind};
pub use role::{Role, RoleAction, RoleManageRequest};
