//! # Validation Module
//!
//! Input validation for cart requests.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: HTTP body deserialization (storefront-api)                   │
//! │  ├── JSON shape, numeric types                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── productId / color / size present and non-empty                    │
//! │  └── quantity rules (add: >= 1, update: >= 0)                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog resolution (storefront-cart)                         │
//! │  └── product exists + active, variant exists, stock bounds             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Color and size are only checked for presence here. A present value that
//! names no color or size is not a validation failure: it simply matches no
//! variant, and the catalog step reports that.

use crate::error::ValidationError;
use crate::types::{Color, Size, VariantKey};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Selection
// =============================================================================

/// A validated `(productId, color, size)` triple, as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub product_id: String,
    pub color: String,
    pub size: String,
}

impl Selection {
    /// Validates that every part of the selection is present.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::validation::Selection;
    ///
    /// assert!(Selection::parse(Some("p-1"), Some("Black"), Some("M")).is_ok());
    /// assert!(Selection::parse(Some("p-1"), None, Some("M")).is_err());
    /// ```
    pub fn parse(
        product_id: Option<&str>,
        color: Option<&str>,
        size: Option<&str>,
    ) -> ValidationResult<Self> {
        Ok(Selection {
            product_id: required("productId", product_id)?.to_string(),
            color: required("color", color)?.to_string(),
            size: required("size", size)?.to_string(),
        })
    }

    /// The variant key this selection names, if color and size are both
    /// members of their enumerations.
    pub fn variant_key(&self) -> Option<VariantKey> {
        let color = self.color.parse::<Color>().ok()?;
        let size = self.size.parse::<Size>().ok()?;
        Some(VariantKey::new(color, size))
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Returns the value unchanged, or `Required` if it is missing or blank.
///
/// Surrounding whitespace is kept: `" Black"` is present but names no color.
pub fn required<'a>(field: &str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// Quantity for adding to the cart.
///
/// ## Rules
/// - Absent means 1
/// - Must be at least 1
///
/// ## User Workflow
/// ```text
/// "Add to cart" with no quantity ──► 1
/// "Add to cart" qty 0 or -2      ──► MustBePositive
/// "Add to cart" qty 3            ──► 3
/// ```
pub fn validate_add_quantity(quantity: Option<i64>) -> ValidationResult<u32> {
    let qty = quantity.unwrap_or(1);
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    to_u32(qty)
}

/// Quantity for setting a line's quantity. `0` means remove the line.
pub fn validate_update_quantity(quantity: Option<i64>) -> ValidationResult<u32> {
    let qty = quantity.ok_or_else(|| ValidationError::Required {
        field: "quantity".to_string(),
    })?;
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }
    to_u32(qty)
}

fn to_u32(qty: i64) -> ValidationResult<u32> {
    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
