//! storefront — the shopping-cart subsystem of an e-commerce backend.
//!
//! Carts, line items with add-time price snapshots, and a checkout that
//! reconciles against live inventory. Persistence sits behind the
//! [`CartStore`] and [`InventoryStore`] traits; in-memory
//! implementations back tests and development. The optional `http`
//! feature adds an axum surface over the service.

mod cart;
mod error;
mod inventory;
mod lock;

#[cfg(feature = "http")]
pub mod http;

pub use cart::{Cart, CartError, CartService, CartStore, InMemoryCartStore, LineItem, ProductSnapshot};
pub use error::StoreError;
pub use inventory::{InMemoryInventoryStore, InventoryStore, ProductRecord};
pub use lock::KeyedLocks;
