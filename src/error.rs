use std::fmt;

/// Error type for store-layer operations (cart store, inventory store).
///
/// Business-rule failures never live here — those are `CartError` kinds.
/// A `StoreError` means the backing store itself misbehaved, and it is
/// surfaced to callers as an opaque internal failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
