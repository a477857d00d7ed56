//! # Cart Entity
//!
//! The durable per-user cart and the pure mutations the Cart Service
//! applies to it.
//!
//! ## Line Item Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  absent ──add_selection (new key)──► created (unit_price snapshot)      │
//! │                                         │                               │
//! │                    add_selection (same key, merge)                      │
//! │                    set_quantity (n > 0)                                 │
//! │                                         ▼                               │
//! │                                  quantity-adjusted                      │
//! │                                         │                               │
//! │          set_quantity(0) | remove_item | clear                          │
//! │                                         ▼                               │
//! │                                      absent                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `(product_id, color, size)` is unique within a cart
//! - `quantity >= 1` on every stored line
//! - `unit_price` is captured when a line is created and never refreshed,
//!   not even when a later add merges more units into the line
//!
//! Every mutation either applies completely or returns an error and leaves
//! the cart untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::types::{Product, Variant, VariantKey};

// =============================================================================
// Cart Item
// =============================================================================

/// One `(product, color, size)` selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub variant: VariantKey,
    pub quantity: u32,
    /// Product price at the moment this line was created.
    pub unit_price: Money,
}

impl CartItem {
    /// Creates a line with the product's current price as the snapshot.
    pub fn snapshot(product: &Product, variant: VariantKey, quantity: u32) -> Self {
        CartItem {
            product_id: product.id.clone(),
            variant,
            quantity,
            unit_price: product.price,
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    pub fn matches(&self, product_id: &str, variant: VariantKey) -> bool {
        self.product_id == product_id && self.variant == variant
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated,
    Removed,
}

/// A user's cart. Exactly one per owner; emptied, never destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub owner_id: String,
    pub items: Vec<CartItem>,
    /// Optimistic concurrency token, bumped by every successful save.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty, not yet persisted cart.
    pub fn new(owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Cart {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            items: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_item(&self, product_id: &str, variant: VariantKey) -> Option<&CartItem> {
        self.items.iter().find(|i| i.matches(product_id, variant))
    }

    /// Adds `quantity` units of `variant`, merging into an existing line.
    ///
    /// ## Rules
    /// ```text
    /// existing line?
    ///   yes ─► existing + quantity > stock ─► ExceedsAvailableStock
    ///          otherwise                   ─► existing += quantity
    ///                                         (unit price NOT re-snapshotted)
    ///   no  ─► quantity > stock            ─► InsufficientStock
    ///          otherwise                   ─► append, unit price = product.price
    /// ```
    pub fn add_selection(
        &mut self,
        product: &Product,
        variant: &Variant,
        quantity: u32,
    ) -> CartResult<()> {
        let key = variant.key();

        if let Some(item) = self.items.iter_mut().find(|i| i.matches(&product.id, key)) {
            let merged = u64::from(item.quantity) + u64::from(quantity);
            if merged > u64::from(variant.stock) {
                return Err(CartError::ExceedsAvailableStock {
                    product_name: product.name.clone(),
                    available: variant.stock,
                    requested: merged,
                });
            }
            // merged <= stock, so it fits
            item.quantity = merged as u32;
            return Ok(());
        }

        if quantity > variant.stock {
            return Err(CartError::InsufficientStock {
                product_name: product.name.clone(),
                available: variant.stock,
                requested: u64::from(quantity),
            });
        }

        self.items.push(CartItem::snapshot(product, key, quantity));
        Ok(())
    }

    /// Sets the quantity of an existing line; `0` removes it.
    ///
    /// The line's unit price is left as it was.
    pub fn set_quantity(
        &mut self,
        product: &Product,
        variant: &Variant,
        quantity: u32,
    ) -> CartResult<QuantityChange> {
        let key = variant.key();
        let position = self
            .items
            .iter()
            .position(|i| i.matches(&product.id, key))
            .ok_or(CartError::ItemNotFound)?;

        if quantity == 0 {
            self.items.remove(position);
            return Ok(QuantityChange::Removed);
        }

        if quantity > variant.stock {
            return Err(CartError::InsufficientStock {
                product_name: product.name.clone(),
                available: variant.stock,
                requested: u64::from(quantity),
            });
        }

        self.items[position].quantity = quantity;
        Ok(QuantityChange::Updated)
    }

    /// Removes a line and returns it.
    pub fn remove_item(&mut self, product_id: &str, variant: VariantKey) -> CartResult<CartItem> {
        let position = self
            .items
            .iter()
            .position(|i| i.matches(product_id, variant))
            .ok_or(CartError::ItemNotFound)?;
        Ok(self.items.remove(position))
    }

    /// Keeps only the lines for which `keep` returns true. Returns how many
    /// lines were dropped.
    pub fn retain_items<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&CartItem) -> bool,
    {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
