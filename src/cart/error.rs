//! Error types for cart service operations.

use std::error::Error;
use std::fmt;

use crate::error::StoreError;

/// Error type for cart operations.
///
/// Every variant is surfaced verbatim to the caller — the service never
/// recovers or retries. `Store` wraps store-layer failures and is the
/// only variant with a `source`.
#[derive(Debug)]
pub enum CartError {
    /// The referenced model has no inventory record.
    ProductNotFound(String),
    /// The product's available quantity is zero.
    EmptyStock(String),
    /// Requested quantity exceeds available stock (which is > 0).
    LowStock {
        model: String,
        requested: u32,
        available: i64,
    },
    /// No unpaid cart exists where one was required.
    CartNotFound(String),
    /// An unpaid cart exists but has no line items.
    EmptyCart(String),
    /// The target model is not a line item in the current cart.
    ProductNotInCart(String),
    /// Store-layer failure (connectivity, poisoned lock).
    Store(StoreError),
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartError::ProductNotFound(model) => write!(f, "product not found: {}", model),
            CartError::EmptyStock(model) => write!(f, "product out of stock: {}", model),
            CartError::LowStock {
                model,
                requested,
                available,
            } => write!(
                f,
                "insufficient stock for {} (requested {}, available {})",
                model, requested, available
            ),
            CartError::CartNotFound(customer) => {
                write!(f, "no current cart for customer: {}", customer)
            }
            CartError::EmptyCart(customer) => {
                write!(f, "cart is empty for customer: {}", customer)
            }
            CartError::ProductNotInCart(model) => write!(f, "product not in cart: {}", model),
            CartError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for CartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CartError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for CartError {
    fn from(err: StoreError) -> Self {
        CartError::Store(err)
    }
}

impl CartError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            CartError::ProductNotFound(_) => 404,
            CartError::EmptyStock(_) => 409,
            CartError::LowStock { .. } => 409,
            CartError::CartNotFound(_) => 404,
            CartError::EmptyCart(_) => 400,
            CartError::ProductNotInCart(_) => 409,
            CartError::Store(_) => 503,
        }
    }
}
