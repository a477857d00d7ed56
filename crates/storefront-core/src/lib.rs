//! # storefront-core: Pure Domain Logic for the Storefront Cart
//!
//! This crate holds the variant-scoped cart rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Cart Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser client                               │   │
//! │  │    Product page ──► Cart drawer ──► Checkout summary            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            storefront-api (axum routes)                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            storefront-cart (CartService)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ totals  │ │checkout │  │   │
//! │  │   │ Product │ │  Money  │ │  Cart   │ │ Totals  │ │  line   │  │   │
//! │  │   │ Variant │ │         │ │CartItem │ │         │ │ checks  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Variant, Color, Size and the variant index
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart entity and its mutations (merge, set, remove, clear)
//! - [`totals`] - Totals calculator over priced lines
//! - [`checkout`] - Per-line checkout checks and the checkout summary
//! - [`validation`] - Request input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Color, Money, Product, Size, Variant, VariantKey};
//!
//! let product = Product::new(
//!     "Oversized Tee",
//!     Money::from_cents(2000),
//!     vec![Variant::new(Color::Black, Size::M, 5)],
//! );
//! let key = VariantKey::new(Color::Black, Size::M);
//! let variant = product.variant(key).unwrap();
//!
//! let mut cart = Cart::new("user-1");
//! cart.add_selection(&product, variant, 3).unwrap();
//! assert_eq!(cart.items[0].line_total().cents(), 6000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, QuantityChange};
pub use checkout::{check_line, CheckoutSummary};
pub use error::{CartError, CartResult, ErrorKind, ValidationError};
pub use money::Money;
pub use totals::{calculate_totals, CartTotals, PricedLine};
pub use types::*;
pub use validation::Selection;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency reported on checkout summaries unless configured otherwise.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Stock given to each generated variant when a catalog record carries none.
pub const DEFAULT_VARIANT_STOCK: u32 = 10;
