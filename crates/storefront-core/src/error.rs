//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CartError        - Cart/checkout rule failures + classification   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-cart errors                                                │
//! │  └── StoreError       - Catalog / cart store collaborator failures     │
//! │                                                                         │
//! │  storefront-db errors                                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  storefront-api errors                                                 │
//! │  └── ApiError         - What the client sees ({code, message})         │
//! │                                                                         │
//! │  Flow: DbError → StoreError → CartError → ApiError → Client            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CartError` belongs to exactly one [`ErrorKind`]; the transport
//! layer maps the kind to a status code and never inspects variants.

use thiserror::Error;

// =============================================================================
// Error Classification
// =============================================================================

/// Stable, caller-visible classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input, or an empty cart at checkout.
    Validation,
    /// No or invalid identity.
    Auth,
    /// Product, variant, cart or cart item does not exist or is inactive.
    NotFound,
    /// Requested quantity exceeds available stock.
    Stock,
    /// Anything unexpected.
    Internal,
}

// =============================================================================
// Cart Error
// =============================================================================

/// Failures of cart and checkout operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Input did not pass validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request carried no usable user identity.
    #[error("authentication required")]
    Unauthenticated,

    /// Product is missing or inactive (add / update).
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// No variant matches the requested color and size.
    #[error("variant not available: {color}/{size}")]
    VariantNotAvailable {
        product_id: String,
        color: String,
        size: String,
    },

    /// The user has no cart yet.
    #[error("cart not found")]
    CartNotFound,

    /// No line matches the requested product, color and size.
    #[error("item not found in cart")]
    ItemNotFound,

    /// A brand-new line asks for more than the variant holds.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to cart (qty: 7)
    ///      │
    ///      ▼
    /// Variant (Black, M) stock = 5
    ///      │
    ///      ▼
    /// InsufficientStock { product_name: "Oversized Tee", available: 5, requested: 7 }
    /// ```
    #[error("insufficient stock for {product_name}: available {available}, requested {requested}")]
    InsufficientStock {
        product_name: String,
        available: u32,
        requested: u64,
    },

    /// Merging into an existing line would pass the variant's stock.
    #[error("quantity exceeds available stock for {product_name}: available {available}, requested {requested}")]
    ExceedsAvailableStock {
        product_name: String,
        available: u32,
        requested: u64,
    },

    /// Checkout on a missing cart or a cart without lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Checkout found a line whose product is missing or inactive.
    #[error("product unavailable: {0}")]
    ProductUnavailable(String),

    /// Checkout found a line whose variant no longer exists.
    #[error("variant not found for {product_name}")]
    VariantNotFound { product_name: String },

    /// Unexpected failure (store backend, exhausted retries).
    #[error("internal error: {0}")]
    Internal(String),
}

impl CartError {
    /// Returns the caller-visible classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::Validation(_) | CartError::EmptyCart => ErrorKind::Validation,
            CartError::Unauthenticated => ErrorKind::Auth,
            CartError::ProductNotFound(_)
            | CartError::VariantNotAvailable { .. }
            | CartError::CartNotFound
            | CartError::ItemNotFound
            | CartError::ProductUnavailable(_)
            | CartError::VariantNotFound { .. } => ErrorKind::NotFound,
            CartError::InsufficientStock { .. } | CartError::ExceedsAvailableStock { .. } => {
                ErrorKind::Stock
            }
            CartError::Internal(_) => ErrorKind::Internal,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any catalog or store access happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be at least 1.
    #[error("{field} must be a positive integer")]
    MustBePositive { field: String },

    /// Value must be 0 or more.
    #[error("{field} must be a non-negative integer")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
