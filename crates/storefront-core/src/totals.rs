//! # Totals Calculator
//!
//! Pure aggregation over priced lines. Used by cart views and by the
//! checkout summary.
//!
//! ```text
//! lines: [{qty 3, 20.00}, {qty 1, 45.00}]
//!      │
//!      ▼
//! calculate_totals
//!      │
//!      ▼
//! total_items = 2 (distinct lines)
//! total_quantity = 4
//! subtotal = 105.00
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartItem;
use crate::money::Money;

/// Anything with a quantity and a unit price.
pub trait PricedLine {
    fn quantity(&self) -> u32;
    fn unit_price(&self) -> Money;
}

impl PricedLine for CartItem {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn unit_price(&self) -> Money {
        self.unit_price
    }
}

impl<T: PricedLine + ?Sized> PricedLine for &T {
    fn quantity(&self) -> u32 {
        (**self).quantity()
    }

    fn unit_price(&self) -> Money {
        (**self).unit_price()
    }
}

/// Aggregate numbers for a list of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Count of distinct lines.
    pub total_items: usize,
    /// Sum of line quantities.
    #[ts(type = "number")]
    pub total_quantity: u64,
    /// Sum of `quantity * unit_price`.
    pub subtotal: Money,
}

/// Computes totals for `lines`. An empty input yields all zeros.
pub fn calculate_totals<I>(lines: I) -> CartTotals
where
    I: IntoIterator,
    I::Item: PricedLine,
{
    lines.into_iter().fold(CartTotals::default(), |mut acc, line| {
        acc.total_items += 1;
        acc.total_quantity += u64::from(line.quantity());
        acc.subtotal += line.unit_price().multiply_quantity(line.quantity());
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Size, VariantKey};

    struct Line(u32, i64);

    impl PricedLine for Line {
        fn quantity(&self) -> u32 {
            self.0
        }
        fn unit_price(&self) -> Money {
            Money::from_cents(self.1)
        }
    }

    #[test]
    fn test_empty_is_zero() {
        let totals = calculate_totals(Vec::<Line>::new());
        assert_eq!(totals, CartTotals::default());
        assert!(totals.subtotal.is_zero());
    }

    #[test]
    fn test_totals() {
        let totals = calculate_totals([Line(3, 2000), Line(1, 4500)]);
        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.total_quantity, 4);
        assert_eq!(totals.subtotal, Money::from_cents(10500));
    }

    #[test]
    fn test_totals_over_cart_item_refs() {
        let items = vec![CartItem {
            product_id: "p".to_string(),
            variant: VariantKey::new(Color::Black, Size::M),
            quantity: 5,
            unit_price: Money::from_cents(2000),
        }];

        let totals = calculate_totals(&items);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.subtotal, Money::from_cents(10000));

        // Calling twice gives the same answer
        assert_eq!(calculate_totals(&items), totals);
    }
}
