//! # Domain Types
//!
//! Catalog-side types the cart engine reads: products, their color/size
//! variants, and the fixed variant domain.
//!
//! ## Variant Grid
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  3 colors × 4 sizes = at most 12 variants per product                   │
//! │                                                                         │
//! │              S        M        L        XL                              │
//! │  Black    [slot 0] [slot 1] [slot 2] [slot 3]                           │
//! │  White    [slot 4] [slot 5] [slot 6] [slot 7]                           │
//! │  Purple   [slot 8] [slot 9] [slot 10][slot 11]                          │
//! │                                                                         │
//! │  VariantSet keeps the catalog's order AND a 12-slot index, so lookup   │
//! │  by (color, size) is exact and O(1). No fuzzy or case-insensitive      │
//! │  matching: "black" is not a color.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Color
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum Color {
    Black,
    White,
    Purple,
}

impl Color {
    /// Every color, in grid order.
    pub const ALL: [Color; 3] = [Color::Black, Color::White, Color::Purple];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
            Color::Purple => "Purple",
        }
    }

    const fn ordinal(&self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
            Color::Purple => 2,
        }
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "color".to_string(),
                allowed: Color::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Size
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum Size {
    S,
    M,
    L,
    XL,
}

impl Size {
    /// Every size, in grid order.
    pub const ALL: [Size; 4] = [Size::S, Size::M, Size::L, Size::XL];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
        }
    }

    const fn ordinal(&self) -> usize {
        match self {
            Size::S => 0,
            Size::M => 1,
            Size::L => 2,
            Size::XL => 3,
        }
    }
}

impl FromStr for Size {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "size".to_string(),
                allowed: Size::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Variant Key
// =============================================================================

/// Number of distinct `(color, size)` pairs.
pub const VARIANT_SLOTS: usize = Color::ALL.len() * Size::ALL.len();

/// Identity of a variant within its product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantKey {
    pub color: Color,
    pub size: Size,
}

impl VariantKey {
    pub const fn new(color: Color, size: Size) -> Self {
        VariantKey { color, size }
    }

    /// Position of this key in the 12-slot grid.
    pub const fn slot(&self) -> usize {
        self.color.ordinal() * Size::ALL.len() + self.size.ordinal()
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.color, self.size)
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A purchasable `(color, size)` combination with its own stock count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Variant {
    pub color: Color,
    pub size: Size,
    pub stock: u32,
}

impl Variant {
    pub const fn new(color: Color, size: Size, stock: u32) -> Self {
        Variant { color, size, stock }
    }

    pub const fn key(&self) -> VariantKey {
        VariantKey::new(self.color, self.size)
    }

    /// Builds the full 3 × 4 grid with the same stock on every variant.
    ///
    /// Used when a catalog record arrives without per-variant data.
    pub fn grid(stock: u32) -> Vec<Variant> {
        Color::ALL
            .into_iter()
            .flat_map(|color| Size::ALL.into_iter().map(move |size| Variant::new(color, size, stock)))
            .collect()
    }
}

// =============================================================================
// Variant Set
// =============================================================================

/// Ordered variants of one product plus an index keyed by `(color, size)`.
///
/// When a key appears more than once, the first occurrence wins and the
/// later duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Variant>", into = "Vec<Variant>")]
pub struct VariantSet {
    variants: Vec<Variant>,
    index: [Option<u8>; VARIANT_SLOTS],
}

impl VariantSet {
    pub fn new(variants: impl IntoIterator<Item = Variant>) -> Self {
        let mut set = VariantSet::default();
        for variant in variants {
            let slot = variant.key().slot();
            if set.index[slot].is_none() {
                set.index[slot] = Some(set.variants.len() as u8);
                set.variants.push(variant);
            }
        }
        set
    }

    /// Exact lookup by `(color, size)`.
    pub fn get(&self, key: VariantKey) -> Option<&Variant> {
        self.index[key.slot()].map(|i| &self.variants[i as usize])
    }

    /// Overwrites the stock of an existing variant. Returns `false` if the
    /// product has no such variant.
    pub fn set_stock(&mut self, key: VariantKey, stock: u32) -> bool {
        match self.index[key.slot()] {
            Some(i) => {
                self.variants[i as usize].stock = stock;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl From<Vec<Variant>> for VariantSet {
    fn from(variants: Vec<Variant>) -> Self {
        VariantSet::new(variants)
    }
}

impl From<VariantSet> for Vec<Variant> {
    fn from(set: VariantSet) -> Self {
        set.variants
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as the cart engine sees it.
///
/// ## Usability
/// A product takes part in cart operations only while `is_active` is true.
/// Deactivated products stay in the catalog but behave as if missing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub is_active: bool,
    #[ts(as = "Vec<Variant>")]
    pub variants: VariantSet,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates an active product with a fresh id.
    pub fn new(name: impl Into<String>, price: Money, variants: Vec<Variant>) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            price,
            is_active: true,
            variants: VariantSet::new(variants),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets an explicit id (fixtures, seeding).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_usable(&self) -> bool {
        self.is_active
    }

    pub fn variant(&self, key: VariantKey) -> Option<&Variant> {
        self.variants.get(key)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
