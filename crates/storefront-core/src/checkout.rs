//! # Checkout Checks
//!
//! Per-line validation applied at checkout, and the summary returned when
//! every line passes.
//!
//! ## Line Check Order
//! ```text
//! for each item, in cart order (stop at the first failure):
//!
//!   1. product missing or inactive ──► ProductUnavailable(product_id)
//!   2. no (color, size) variant    ──► VariantNotFound { product_name }
//!   3. variant.stock < quantity    ──► InsufficientStock { product_name, .. }
//! ```
//!
//! Checkout is a validation and pricing read. It never reserves or
//! decrements stock and never creates an order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartItem;
use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::totals::CartTotals;
use crate::types::Product;

/// Checks one cart line against the catalog's current view of its product.
pub fn check_line(item: &CartItem, product: Option<&Product>) -> CartResult<()> {
    let product = product
        .filter(|p| p.is_usable())
        .ok_or_else(|| CartError::ProductUnavailable(item.product_id.clone()))?;

    let variant = product
        .variant(item.variant)
        .ok_or_else(|| CartError::VariantNotFound {
            product_name: product.name.clone(),
        })?;

    if variant.stock < item.quantity {
        return Err(CartError::InsufficientStock {
            product_name: product.name.clone(),
            available: variant.stock,
            requested: u64::from(item.quantity),
        });
    }

    Ok(())
}

/// Summary block of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    pub total_items: usize,
    #[ts(type = "number")]
    pub total_quantity: u64,
    pub subtotal: Money,
    pub currency: String,
}

impl CheckoutSummary {
    pub fn new(totals: CartTotals, currency: impl Into<String>) -> Self {
        CheckoutSummary {
            total_items: totals.total_items,
            total_quantity: totals.total_quantity,
            subtotal: totals.subtotal,
            currency: currency.into(),
        }
    }
}
