//! The shopping-cart subsystem: cart types, the store contract, and the
//! service that drives the add → checkout lifecycle.
//!
//! A customer has at most one unpaid "current" cart at a time, created
//! lazily on their first add, plus any number of paid historical carts.
//! Line items snapshot category and price at add time; only checkout
//! consults live inventory again, decrementing stock per line.
//!
//! ## Quick start
//!
//! ```ignore
//! use storefront::{CartService, InMemoryCartStore, InMemoryInventoryStore, ProductRecord};
//!
//! let inventory = InMemoryInventoryStore::new();
//! inventory.insert(ProductRecord::new("iphone-13", "Smartphone", 99_900, 10))?;
//! let service = CartService::new(InMemoryCartStore::new(), inventory);
//!
//! service.add_product("customer-1", "iphone-13")?;
//! let cart = service.current_cart("customer-1")?;
//! assert_eq!(cart.products.len(), 1);
//!
//! let paid = service.checkout("customer-1")?;
//! assert!(paid.payment_date.is_some());
//! ```

mod cart;
mod error;
mod in_memory;
mod service;
mod store;

pub use cart::{Cart, LineItem, ProductSnapshot};
pub use error::CartError;
pub use in_memory::InMemoryCartStore;
pub use service::CartService;
pub use store::CartStore;
