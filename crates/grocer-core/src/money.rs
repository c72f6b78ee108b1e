//! # Money Module
//!
//! Provides the `Money` type used for shelf prices, cart lines and receipts.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RECEIPT ARITHMETIC                                                     │
//! │                                                                         │
//! │  Catalog price numeric(6,2) ──► rounded once into cents                 │
//! │                                                                         │
//! │  line cost  = unit cents × count        (exact)                         │
//! │  subtotal   = Σ line cost               (exact)                         │
//! │  tax        = subtotal × rate, half-up  (rounded once)                  │
//! │                                                                         │
//! │  Every rounding step of the receipt happens in exactly one place.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::money::Money;
//!
//! let milk = Money::from_cents(300); // $3.00
//! let line = milk.multiply_quantity(3);
//! assert_eq!(line.to_string(), "$9.00");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so intermediate arithmetic can never wrap silently; the domain
/// types that store prices clamp negatives to zero themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    ///
    /// let price = Money::from_cents(449); // $4.49
    /// assert_eq!(price.cents(), 449);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a two-decimal catalog price into cents, rounding to the
    /// nearest cent.
    ///
    /// The catalog stores `numeric(6,2)`, which SQLite hands back as a
    /// floating value. This is the only place that float is allowed to
    /// touch money.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    ///
    /// assert_eq!(Money::from_catalog_price(3.0).cents(), 300);
    /// assert_eq!(Money::from_catalog_price(4.19).cents(), 419);
    /// ```
    pub fn from_catalog_price(price: f64) -> Self {
        Money((price * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Floors negative values at zero.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-250).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(250).clamp_non_negative().cents(), 250);
    /// ```
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Calculates tax at the given rate, rounding half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount × bps + 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    /// use grocer_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(900); // $9.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(928)); // 9.28%
    /// // $9.00 × 9.28% = $0.8352 → $0.84
    /// assert_eq!(tax.cents(), 84);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps huge carts from overflowing before the division
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a count.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart line: milk $3.00, count 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Receipt line cost: $9.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$D.CC`, the format used on shelves and receipts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let rendered = format!(
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        );
        // pad() so receipt columns can use width/alignment specifiers
        f.pad(&rendered)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
