//! # Domain Types
//!
//! Catalog-side types shared by the store gateway and the shopping session.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ShelfListing   │   │    CartLine     │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │   │  bps (u32)      │       │
//! │  │  name           │   │  name           │   │  928 = 9.28%    │       │
//! │  │  price          │   │  price          │   └─────────────────┘       │
//! │  │  (no count)     │   │  count          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  AisleLayout: aisle number ──► description (ordered)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A shelf listing is what the shopper sees in an aisle. It never carries a
//! count; the cart owns counts through [`CartLine`](crate::cart::CartLine).

use std::collections::BTreeMap;
use std::fmt;

use crate::money::Money;

/// Catalog product identifier (`Product.ID`).
pub type ProductId = i64;

/// Aisle identifier (`Aisle.aisleNumber`).
pub type AisleNumber = i64;

/// Aisle number to description, ordered by aisle number.
pub type AisleLayout = BTreeMap<AisleNumber, String>;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the store rate of 9.28% is 928 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::STORE_TAX_RATE_BPS)
    }
}

// =============================================================================
// Shelf Listing
// =============================================================================

/// A product as it appears on an aisle shelf.
///
/// Built fresh each time an aisle is read from the catalog. The listing is
/// display-only and says nothing about how many units are on hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfListing {
    id: ProductId,
    name: String,
    price: Money,
}

impl ShelfListing {
    /// Creates a listing; a negative price is floored at zero.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        ShelfListing {
            id,
            name: name.into(),
            price: price.clamp_non_negative(),
        }
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }
}

/// `($3.00) milk`
impl fmt::Display for ShelfListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.price, self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(928);
        assert_eq!(rate.bps(), 928);
        assert!((rate.percentage() - 9.28).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_default_is_store_rate() {
        assert_eq!(TaxRate::default().bps(), 928);
    }

    #[test]
    fn test_shelf_listing_display() {
        let milk = ShelfListing::new(0, "milk", Money::from_cents(300));
        assert_eq!(milk.to_string(), "($3.00) milk");
    }

    #[test]
    fn test_shelf_listing_clamps_negative_price() {
        let odd = ShelfListing::new(7, "odd", Money::from_cents(-5));
        assert_eq!(odd.price(), Money::zero());
    }
}
