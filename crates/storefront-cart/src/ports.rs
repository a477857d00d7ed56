//! # Collaborator Ports
//!
//! The two external dependencies of the cart engine, expressed as traits so
//! they can be injected (SQLite in production, in-memory in tests).

use async_trait::async_trait;
use storefront_core::{Cart, Product};

use crate::error::StoreResult;

/// Read-only view over the catalog.
///
/// The catalog is shared and changes independently of carts, so callers
/// must re-read it instead of caching stock.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Returns the product, active or not, or `None` if it does not exist.
    async fn find_product(&self, product_id: &str) -> StoreResult<Option<Product>>;
}

/// Durable storage for one cart per owner.
///
/// ## Write Discipline
/// ```text
/// get_by_owner ──► mutate in memory ──► save(cart)
///                                          │
///                     stored.version == cart.version ?
///                          │ yes                 │ no
///                          ▼                     ▼
///                 persist, version + 1     StoreError::Conflict
///
/// no cart yet  ──► build in memory   ──► create(cart)   cart + lines, all or nothing
/// ```
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get_by_owner(&self, owner_id: &str) -> StoreResult<Option<Cart>>;

    /// Stores a new cart together with its lines in one step. Fails with
    /// `Conflict` if the owner already has a cart; on any failure nothing
    /// is stored.
    async fn create(&self, cart: &Cart) -> StoreResult<Cart>;

    /// Compare-and-swap on `cart.version`. Returns the stored cart with the
    /// bumped version and a fresh `updated_at`.
    async fn save(&self, cart: &Cart) -> StoreResult<Cart>;
}
