//! InventoryStore — the inventory contract consumed by the cart service.

use super::ProductRecord;
use crate::error::StoreError;

/// Abstract read/decrement access to inventory.
///
/// Implementations must be internally synchronized: `decrement_quantity`
/// is the one cross-boundary write in the system (the cart service
/// decrements stock it does not own) and has to behave like a single
/// conditional statement (`UPDATE ... SET qty = qty - ? WHERE model = ?
/// AND qty >= ?`), never a separate read-then-write.
pub trait InventoryStore: Send + Sync {
    /// Look up a product by model. Returns None if no such model exists.
    fn get_by_model(&self, model: &str) -> Result<Option<ProductRecord>, StoreError>;

    /// Read the live available quantity. Returns None for an unknown model.
    fn quantity(&self, model: &str) -> Result<Option<i64>, StoreError>;

    /// Atomically decrement the available quantity by `amount`.
    ///
    /// Returns `Some(new_quantity)` when the stock covered `amount`, and
    /// `None` when it did not (or the model is unknown) — in which case
    /// nothing is changed. Quantity never goes negative.
    fn decrement_quantity(&self, model: &str, amount: i64) -> Result<Option<i64>, StoreError>;
}
