//! # In-Memory Collaborators
//!
//! Process-local implementations of [`CatalogReader`] and [`CartStore`].
//! They honor the same contracts as the SQLite repositories (including the
//! version check on save) and back the service tests.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use storefront_core::{Cart, Money, Product, VariantKey};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::ports::{CartStore, CatalogReader};

// =============================================================================
// Catalog
// =============================================================================

/// A mutable catalog held in memory.
///
/// The mutators exist so tests can change the catalog between cart calls,
/// the way an admin or a catalog sync would.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id.clone(), p)).collect();
        InMemoryCatalog {
            products: RwLock::new(map),
        }
    }

    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id.clone(), product);
    }

    pub async fn remove(&self, product_id: &str) -> Option<Product> {
        self.products.write().await.remove(product_id)
    }

    /// Returns `false` if the product does not exist.
    pub async fn set_active(&self, product_id: &str, active: bool) -> bool {
        self.update(product_id, |p| p.is_active = active).await
    }

    pub async fn set_price(&self, product_id: &str, price: Money) -> bool {
        self.update(product_id, |p| p.price = price).await
    }

    /// Returns `false` if the product or the variant does not exist.
    pub async fn set_stock(&self, product_id: &str, key: VariantKey, stock: u32) -> bool {
        let mut products = self.products.write().await;
        match products.get_mut(product_id) {
            Some(product) => {
                product.updated_at = Utc::now();
                product.variants.set_stock(key, stock)
            }
            None => false,
        }
    }

    async fn update<F>(&self, product_id: &str, f: F) -> bool
    where
        F: FnOnce(&mut Product),
    {
        let mut products = self.products.write().await;
        match products.get_mut(product_id) {
            Some(product) => {
                f(product);
                product.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn find_product(&self, product_id: &str) -> StoreResult<Option<Product>> {
        Ok(self.products.read().await.get(product_id).cloned())
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Carts keyed by owner id.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: DashMap<String, Cart>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of carts ever created.
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get_by_owner(&self, owner_id: &str) -> StoreResult<Option<Cart>> {
        Ok(self.carts.get(owner_id).map(|c| c.value().clone()))
    }

    async fn create(&self, cart: &Cart) -> StoreResult<Cart> {
        match self.carts.entry(cart.owner_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::conflict(&cart.owner_id)),
            Entry::Vacant(slot) => {
                debug!(user_id = %cart.owner_id, cart_id = %cart.id, items = cart.items.len(), "Created cart");
                slot.insert(cart.clone());
                Ok(cart.clone())
            }
        }
    }

    async fn save(&self, cart: &Cart) -> StoreResult<Cart> {
        let mut stored = self
            .carts
            .get_mut(&cart.owner_id)
            .ok_or_else(|| StoreError::conflict(&cart.owner_id))?;

        if stored.version != cart.version || stored.id != cart.id {
            return Err(StoreError::conflict(&cart.owner_id));
        }

        let mut saved = cart.clone();
        saved.version += 1;
        saved.updated_at = Utc::now();
        *stored = saved.clone();
        Ok(saved)
    }
}
