//! CartService — the add/remove/checkout/clear orchestration.
//!
//! Generic over its two store contracts: `C` (cart persistence) and `I`
//! (inventory). The service applies every business rule itself — the
//! stores hold no cart logic and inventory knows nothing about carts.
//!
//! Mutations serialize per customer through a [`KeyedLocks`] registry,
//! so concurrent requests against the same cart cannot lose updates.
//! Cross-customer contention on stock is handled entirely by the
//! inventory store's atomic conditional decrement.
//!
//! ## Example
//!
//! ```ignore
//! use storefront::{CartService, InMemoryCartStore, InMemoryInventoryStore, ProductRecord};
//!
//! let inventory = InMemoryInventoryStore::new();
//! inventory.insert(ProductRecord::new("iphone-13", "Smartphone", 99_900, 10))?;
//!
//! let service = CartService::new(InMemoryCartStore::new(), inventory);
//! let cart = service.add_product("customer-1", "iphone-13")?;
//! assert_eq!(cart.total, 99_900);
//!
//! let paid = service.checkout("customer-1")?;
//! assert!(paid.paid);
//! ```

use chrono::Utc;

use super::{Cart, CartError, CartStore, ProductSnapshot};
use crate::error::StoreError;
use crate::inventory::InventoryStore;
use crate::lock::KeyedLocks;

/// Outcome of the find-or-create step at the top of `add_product`.
enum CurrentCart {
    Existing(Cart),
    Created(Cart),
}

impl CurrentCart {
    fn into_cart(self) -> Cart {
        match self {
            CurrentCart::Existing(cart) | CurrentCart::Created(cart) => cart,
        }
    }
}

/// The cart subsystem's service layer.
pub struct CartService<C, I> {
    carts: C,
    inventory: I,
    locks: KeyedLocks,
}

impl<C: CartStore, I: InventoryStore> CartService<C, I> {
    /// Create a service over the given stores.
    pub fn new(carts: C, inventory: I) -> Self {
        Self {
            carts,
            inventory,
            locks: KeyedLocks::new(),
        }
    }

    /// Access the cart store (test seeding and inspection).
    pub fn carts(&self) -> &C {
        &self.carts
    }

    /// Access the inventory store.
    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Add one unit of `model` to the customer's current cart, creating
    /// the cart if none exists.
    ///
    /// Inventory is validated (the model must exist and have stock > 0)
    /// but never decremented here — stock only moves at checkout. The
    /// line's category and price are snapshotted from inventory the
    /// first time the model enters the cart.
    pub fn add_product(&self, customer: &str, model: &str) -> Result<Cart, CartError> {
        // Validate against inventory before touching any cart, so a bad
        // model never creates one.
        let product = self
            .inventory
            .get_by_model(model)?
            .ok_or_else(|| CartError::ProductNotFound(model.to_string()))?;
        if product.quantity <= 0 {
            return Err(CartError::EmptyStock(model.to_string()));
        }

        let lock = self.locks.get(customer)?;
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("customer cart mutation"))?;

        let mut cart = self.find_or_create(customer)?.into_cart();
        cart.add_one(
            model,
            ProductSnapshot {
                category: product.category,
                price: product.price,
            },
        );
        self.carts.persist(&cart)?;
        Ok(cart)
    }

    /// The customer's current unpaid cart.
    ///
    /// "No cart yet" is not an error for a read: a customer without an
    /// unpaid cart gets a synthesized empty one back.
    pub fn current_cart(&self, customer: &str) -> Result<Cart, CartError> {
        match self.carts.find_unpaid(customer)? {
            Some(cart) => Ok(cart),
            None => Ok(Cart::detached(customer)),
        }
    }

    /// Check out the customer's current cart: validate every line against
    /// live stock, decrement inventory, and mark the cart paid.
    ///
    /// Lines are processed in cart order and the first failing line
    /// aborts the whole checkout. Stock already decremented for earlier
    /// lines stays decremented — the cart remains unpaid and the customer
    /// re-attempts explicitly.
    pub fn checkout(&self, customer: &str) -> Result<Cart, CartError> {
        let lock = self.locks.get(customer)?;
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("customer cart mutation"))?;

        let mut cart = self
            .carts
            .find_unpaid(customer)?
            .ok_or_else(|| CartError::CartNotFound(customer.to_string()))?;
        if cart.is_empty() {
            return Err(CartError::EmptyCart(customer.to_string()));
        }

        for line in &cart.products {
            let requested = i64::from(line.quantity);
            // Live quantity, not the add-time snapshot.
            let available = self.inventory.quantity(&line.model)?.unwrap_or(0);
            if available <= 0 {
                return Err(CartError::EmptyStock(line.model.clone()));
            }
            if available < requested {
                return Err(CartError::LowStock {
                    model: line.model.clone(),
                    requested: line.quantity,
                    available,
                });
            }
            if self
                .inventory
                .decrement_quantity(&line.model, requested)?
                .is_none()
            {
                // A concurrent sale took the stock between the read and
                // the decrement; re-read to classify the failure.
                let available = self.inventory.quantity(&line.model)?.unwrap_or(0);
                return Err(if available <= 0 {
                    CartError::EmptyStock(line.model.clone())
                } else {
                    CartError::LowStock {
                        model: line.model.clone(),
                        requested: line.quantity,
                        available,
                    }
                });
            }
        }

        cart.mark_paid(Utc::now());
        self.carts.persist(&cart)?;
        Ok(cart)
    }

    /// The customer's checkout history: every paid cart, in store order.
    /// The current unpaid cart, if any, is excluded.
    pub fn customer_carts(&self, customer: &str) -> Result<Vec<Cart>, CartError> {
        Ok(self.carts.find_paid(customer)?)
    }

    /// Remove one unit of `model` from the customer's current cart. A
    /// line reduced to zero quantity is dropped entirely. Inventory is
    /// untouched.
    pub fn remove_one_unit(&self, customer: &str, model: &str) -> Result<Cart, CartError> {
        let lock = self.locks.get(customer)?;
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("customer cart mutation"))?;

        let mut cart = self
            .carts
            .find_unpaid(customer)?
            .ok_or_else(|| CartError::CartNotFound(customer.to_string()))?;
        if cart.is_empty() {
            return Err(CartError::EmptyCart(customer.to_string()));
        }
        if !cart.remove_one(model) {
            return Err(CartError::ProductNotInCart(model.to_string()));
        }
        self.carts.persist(&cart)?;
        Ok(cart)
    }

    /// Empty the customer's current cart (line items gone, total 0). The
    /// cart itself survives, still unpaid.
    pub fn clear_cart(&self, customer: &str) -> Result<Cart, CartError> {
        let lock = self.locks.get(customer)?;
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("customer cart mutation"))?;

        let mut cart = self
            .carts
            .find_unpaid(customer)?
            .ok_or_else(|| CartError::CartNotFound(customer.to_string()))?;
        cart.clear();
        self.carts.persist(&cart)?;
        Ok(cart)
    }

    /// Administrative: every cart in the store, any owner, any state.
    pub fn all_carts(&self) -> Result<Vec<Cart>, CartError> {
        Ok(self.carts.find_all()?)
    }

    /// Administrative: erase every cart.
    pub fn delete_all_carts(&self) -> Result<(), CartError> {
        Ok(self.carts.delete_all()?)
    }

    /// Explicit find-or-create for the customer's unpaid cart. Tagged so
    /// callers can tell reuse from creation.
    fn find_or_create(&self, customer: &str) -> Result<CurrentCart, CartError> {
        match self.carts.find_unpaid(customer)? {
            Some(cart) => Ok(CurrentCart::Existing(cart)),
            None => Ok(CurrentCart::Created(self.carts.create(customer)?)),
        }
    }
}
