//! # Store Error Types
//!
//! Failures reported by the catalog and cart store collaborators.
//!
//! ```text
//! DbError (storefront-db) ──► StoreError ──► CartError::Internal
//!                                  │
//!                                  └── Conflict is retried by CartService
//!                                      before it ever becomes an error
//! ```

use storefront_core::CartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The cart changed since it was read (version mismatch), or a cart
    /// already exists for an owner being created.
    #[error("cart for {owner_id} was modified concurrently")]
    Conflict { owner_id: String },

    /// Backend failure (I/O, corrupt row, closed pool).
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn conflict(owner_id: impl Into<String>) -> Self {
        StoreError::Conflict {
            owner_id: owner_id.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

impl From<StoreError> for CartError {
    fn from(err: StoreError) -> Self {
        CartError::Internal(err.to_string())
    }
}

/// Result type for collaborator operations.
pub type StoreResult<T> = Result<T, StoreError>;
