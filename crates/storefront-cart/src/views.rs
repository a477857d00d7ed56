//! # Request and Response Shapes
//!
//! What callers send to and receive from [`CartService`](crate::CartService).
//! JSON field names are camelCase.
//!
//! ## Cart View
//! ```json
//! {
//!   "cartId": "8c1f…",
//!   "items": [
//!     { "productId": "p-1", "variant": { "color": "Black", "size": "M" },
//!       "quantity": 3, "unitPrice": 2000, "lineTotal": 6000 }
//!   ],
//!   "totalItems": 3,
//!   "totalPrice": 6000
//! }
//! ```
//! `totalItems` is the sum of quantities. A user without a cart gets
//! `{"items": [], "totalItems": 0, "totalPrice": 0}`.

use serde::{Deserialize, Serialize};
use storefront_core::{
    calculate_totals, Cart, CartItem, CheckoutSummary, Money, VariantKey,
};
use ts_rs::TS;

// =============================================================================
// Requests
// =============================================================================

/// Body of "add item". Every field is optional at the wire level so that a
/// missing field is reported as a validation error, not a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddItemRequest {
    pub product_id: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    /// Defaults to 1.
    #[ts(type = "number | null")]
    pub quantity: Option<i64>,
}

impl AddItemRequest {
    pub fn new(product_id: &str, color: &str, size: &str, quantity: i64) -> Self {
        AddItemRequest {
            product_id: Some(product_id.to_string()),
            color: Some(color.to_string()),
            size: Some(size.to_string()),
            quantity: Some(quantity),
        }
    }
}

/// Body of "update item quantity". `quantity: 0` removes the line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateQuantityRequest {
    pub product_id: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    #[ts(type = "number | null")]
    pub quantity: Option<i64>,
}

impl UpdateQuantityRequest {
    pub fn new(product_id: &str, color: &str, size: &str, quantity: i64) -> Self {
        UpdateQuantityRequest {
            product_id: Some(product_id.to_string()),
            color: Some(color.to_string()),
            size: Some(size.to_string()),
            quantity: Some(quantity),
        }
    }
}

/// Body of "remove item".
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RemoveItemRequest {
    pub product_id: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl RemoveItemRequest {
    pub fn new(product_id: &str, color: &str, size: &str) -> Self {
        RemoveItemRequest {
            product_id: Some(product_id.to_string()),
            color: Some(color.to_string()),
            size: Some(size.to_string()),
        }
    }
}

// =============================================================================
// Cart View
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    pub variant: VariantKey,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
    /// Set only under the flag-stale read policy, for lines whose product is
    /// missing or inactive.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    #[ts(as = "Option<_>", optional)]
    pub stale: bool,
}

impl CartLine {
    fn from_item(item: &CartItem, stale: bool) -> Self {
        CartLine {
            product_id: item.product_id.clone(),
            variant: item.variant,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
            stale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cart_id: Option<String>,
    pub items: Vec<CartLine>,
    /// Sum of quantities over non-stale lines.
    #[ts(type = "number")]
    pub total_items: u64,
    /// Sum of line totals over non-stale lines.
    pub total_price: Money,
}

impl CartView {
    /// View for a user who has no cart.
    pub fn empty() -> Self {
        CartView {
            cart_id: None,
            items: Vec::new(),
            total_items: 0,
            total_price: Money::zero(),
        }
    }

    pub fn from_cart(cart: &Cart) -> Self {
        Self::with_stale(cart, |_| false)
    }

    /// Builds the view, marking lines for which `is_stale` holds and leaving
    /// them out of the totals.
    pub fn with_stale<F>(cart: &Cart, is_stale: F) -> Self
    where
        F: Fn(&CartItem) -> bool,
    {
        let items: Vec<CartLine> = cart
            .items
            .iter()
            .map(|item| CartLine::from_item(item, is_stale(item)))
            .collect();
        let totals = calculate_totals(cart.items.iter().filter(|item| !is_stale(item)));

        CartView {
            cart_id: Some(cart.id.clone()),
            items,
            total_items: totals.total_quantity,
            total_price: totals.subtotal,
        }
    }
}

// =============================================================================
// Checkout View
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutView {
    pub items: Vec<CartLine>,
    pub summary: CheckoutSummary,
}

impl CheckoutView {
    pub fn new(cart: &Cart, currency: &str) -> Self {
        CheckoutView {
            items: cart.items.iter().map(|i| CartLine::from_item(i, false)).collect(),
            summary: CheckoutSummary::new(calculate_totals(&cart.items), currency),
        }
    }
}
