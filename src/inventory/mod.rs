//! Inventory Store — product records and stock levels.
//!
//! The cart subsystem consumes inventory through the [`InventoryStore`]
//! trait: a lookup by model, a live quantity read, and an atomic
//! conditional decrement used during checkout. Product registration and
//! the rest of inventory CRUD live elsewhere in the backend; this module
//! only carries the contract the cart service depends on, plus an
//! in-memory implementation for tests and development.
//!
//! ## Example
//!
//! ```ignore
//! use storefront::{InMemoryInventoryStore, InventoryStore, ProductRecord};
//!
//! let inventory = InMemoryInventoryStore::new();
//! inventory.insert(ProductRecord::new("iphone-13", "Smartphone", 99_900, 10))?;
//!
//! let product = inventory.get_by_model("iphone-13")?.unwrap();
//! assert_eq!(product.price, 99_900);
//!
//! // Conditional decrement: Some(new_qty) if stock covered the amount.
//! assert_eq!(inventory.decrement_quantity("iphone-13", 3)?, Some(7));
//! ```

mod in_memory;
mod store;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One inventory row, keyed by its unique model identifier.
///
/// `price` is in minor currency units. `quantity` is the live available
/// stock — the only inventory field the cart service ever mutates
/// (decremented at checkout, never at add time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub model: String,
    pub category: String,
    pub price: i64,
    pub quantity: i64,
    pub arrival_date: NaiveDate,
}

impl ProductRecord {
    /// Build a record with today's date as the arrival date.
    pub fn new(
        model: impl Into<String>,
        category: impl Into<String>,
        price: i64,
        quantity: i64,
    ) -> Self {
        Self {
            model: model.into(),
            category: category.into(),
            price,
            quantity,
            arrival_date: chrono::Utc::now().date_naive(),
        }
    }
}

pub use in_memory::InMemoryInventoryStore;
pub use store::InventoryStore;
