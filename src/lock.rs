//! Keyed mutual exclusion for per-customer cart mutations.
//!
//! The store layer is internally synchronized, but a cart mutation is a
//! read-modify-write spanning several store calls. `KeyedLocks` hands out
//! one lock per key (customer id), created lazily, so two concurrent
//! mutations on the same customer's cart serialize instead of losing
//! updates. Different customers never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;

/// Lazily created `Mutex` per key. Repeated lookups for the same key
/// return the same `Arc`.
#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for `key`. Callers hold the returned Arc
    /// and lock it for the span of their read-modify-write sequence.
    pub fn get(&self, key: &str) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| StoreError::LockPoisoned("lock registry"))?;
        Ok(locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }
}
