//! CartStore — the persistence contract consumed by the cart service.

use super::Cart;
use crate::error::StoreError;

/// Abstract cart persistence.
///
/// "At most one unpaid cart per customer" is the service's invariant, not
/// the store's — `find_unpaid` simply returns whichever unpaid cart
/// exists, and `create` always makes a new empty one.
pub trait CartStore: Send + Sync {
    /// The customer's current unpaid cart, if any.
    fn find_unpaid(&self, customer: &str) -> Result<Option<Cart>, StoreError>;

    /// Create and persist a new empty unpaid cart, returning it with its
    /// store-assigned id.
    fn create(&self, customer: &str) -> Result<Cart, StoreError>;

    /// Upsert the cart's scalar fields and fully replace its line-item
    /// associations (delete-then-reinsert, not a diff).
    fn persist(&self, cart: &Cart) -> Result<(), StoreError>;

    /// Every paid cart belonging to the customer, in retrieval order.
    fn find_paid(&self, customer: &str) -> Result<Vec<Cart>, StoreError>;

    /// Every cart, regardless of owner or paid state.
    fn find_all(&self) -> Result<Vec<Cart>, StoreError>;

    /// Erase every cart and line item. Administrative bulk operation.
    fn delete_all(&self) -> Result<(), StoreError>;
}
