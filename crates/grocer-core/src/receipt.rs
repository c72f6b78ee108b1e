//! # Receipt Totals
//!
//! The arithmetic half of a receipt. Layout and printing live in the shop
//! app; this module only decides the numbers.
//!
//! ```text
//! subtotal = Σ (unit price × count)
//! tax      = subtotal × rate          (half-up to the cent)
//! total    = subtotal + tax
//! ```
//!
//! Because the subtotal is a whole number of cents, `subtotal + tax` is the
//! same value as rounding `subtotal × (1 + rate)` directly.

use crate::cart::CartLine;
use crate::money::Money;
use crate::types::TaxRate;

/// Subtotal, tax and total for a finalized cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl ReceiptTotals {
    /// Computes totals for the given lines at `rate`.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::cart::CartLine;
    /// use grocer_core::money::Money;
    /// use grocer_core::receipt::ReceiptTotals;
    /// use grocer_core::types::TaxRate;
    ///
    /// let lines = vec![CartLine::new(0, "milk", Money::from_cents(300), 3)];
    /// let totals = ReceiptTotals::compute(&lines, TaxRate::from_bps(928));
    /// assert_eq!(totals.subtotal.cents(), 900);
    /// assert_eq!(totals.tax.cents(), 84);
    /// assert_eq!(totals.total.cents(), 984);
    /// ```
    pub fn compute(lines: &[CartLine], rate: TaxRate) -> Self {
        let subtotal: Money = lines.iter().map(CartLine::line_total).sum();
        let tax = subtotal.calculate_tax(rate);
        ReceiptTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
