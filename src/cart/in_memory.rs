//! InMemoryCartStore — HashMap-backed cart store for testing and development.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use super::{Cart, CartStore, LineItem};
use crate::error::StoreError;

/// Scalar cart fields, kept separate from the line-item associations the
/// way a relational schema would (carts table + cart_products table).
#[derive(Clone)]
struct CartRow {
    id: u64,
    customer: String,
    paid: bool,
    payment_date: Option<DateTime<Utc>>,
    total: i64,
}

#[derive(Default)]
struct Tables {
    next_id: u64,
    // BTreeMap so find_all/find_paid come back in id order, matching a
    // primary-key scan.
    carts: BTreeMap<u64, CartRow>,
    lines: HashMap<u64, Vec<LineItem>>,
}

impl Tables {
    fn assemble(&self, row: &CartRow) -> Cart {
        Cart {
            id: row.id,
            customer: row.customer.clone(),
            paid: row.paid,
            payment_date: row.payment_date,
            total: row.total,
            products: self.lines.get(&row.id).cloned().unwrap_or_default(),
        }
    }
}

/// In-memory cart store. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCartStore {
    /// Create a new empty cart store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for InMemoryCartStore {
    fn find_unpaid(&self, customer: &str) -> Result<Option<Cart>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("cart lookup"))?;
        Ok(tables
            .carts
            .values()
            .find(|row| row.customer == customer && !row.paid)
            .map(|row| tables.assemble(row)))
    }

    fn create(&self, customer: &str) -> Result<Cart, StoreError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::LockPoisoned("cart create"))?;
        tables.next_id += 1;
        let id = tables.next_id;
        tables.carts.insert(
            id,
            CartRow {
                id,
                customer: customer.to_string(),
                paid: false,
                payment_date: None,
                total: 0,
            },
        );
        Ok(Cart::new(id, customer))
    }

    fn persist(&self, cart: &Cart) -> Result<(), StoreError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::LockPoisoned("cart persist"))?;
        tables.carts.insert(
            cart.id,
            CartRow {
                id: cart.id,
                customer: cart.customer.clone(),
                paid: cart.paid,
                payment_date: cart.payment_date,
                total: cart.total,
            },
        );
        // Replace the full line-item set: delete, then reinsert.
        tables.lines.remove(&cart.id);
        if !cart.products.is_empty() {
            tables.lines.insert(cart.id, cart.products.clone());
        }
        Ok(())
    }

    fn find_paid(&self, customer: &str) -> Result<Vec<Cart>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("paid cart lookup"))?;
        Ok(tables
            .carts
            .values()
            .filter(|row| row.customer == customer && row.paid)
            .map(|row| tables.assemble(row))
            .collect())
    }

    fn find_all(&self) -> Result<Vec<Cart>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("cart scan"))?;
        Ok(tables
            .carts
            .values()
            .map(|row| tables.assemble(row))
            .collect())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::LockPoisoned("cart delete all"))?;
        tables.carts.clear();
        tables.lines.clear();
        Ok(())
    }
}
