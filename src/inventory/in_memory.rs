//! InMemoryInventoryStore — HashMap-backed inventory for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{InventoryStore, ProductRecord};
use crate::error::StoreError;

/// In-memory inventory keyed by model. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryInventoryStore {
    products: Arc<RwLock<HashMap<String, ProductRecord>>>,
}

impl InMemoryInventoryStore {
    /// Create a new empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product record. Seeding helper, not part of
    /// the `InventoryStore` contract.
    pub fn insert(&self, product: ProductRecord) -> Result<(), StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| StoreError::LockPoisoned("inventory insert"))?;
        products.insert(product.model.clone(), product);
        Ok(())
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn get_by_model(&self, model: &str) -> Result<Option<ProductRecord>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| StoreError::LockPoisoned("inventory lookup"))?;
        Ok(products.get(model).cloned())
    }

    fn quantity(&self, model: &str) -> Result<Option<i64>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| StoreError::LockPoisoned("inventory quantity read"))?;
        Ok(products.get(model).map(|p| p.quantity))
    }

    fn decrement_quantity(&self, model: &str, amount: i64) -> Result<Option<i64>, StoreError> {
        // Check and decrement under one write-lock acquisition, so two
        // concurrent checkouts cannot both observe the same stock level.
        let mut products = self
            .products
            .write()
            .map_err(|_| StoreError::LockPoisoned("inventory decrement"))?;
        match products.get_mut(model) {
            Some(product) if product.quantity >= amount => {
                product.quantity -= amount;
                Ok(Some(product.quantity))
            }
            _ => Ok(None),
        }
    }
}
