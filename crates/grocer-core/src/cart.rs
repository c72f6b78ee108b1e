//! # Cart Module
//!
//! The shopper's cart: an insertion-ordered set of [`CartLine`]s, unique by
//! product id.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Cart Call               Cart Change           │
//! │  ──────────────           ─────────               ───────────           │
//! │                                                                         │
//! │  Pick shelf item ───────► add(line) ────────────► push, or count += 1  │
//! │                                                                         │
//! │  Drop a product ────────► remove(id) ───────────► whole line removed   │
//! │                                                                         │
//! │  Checkout done ─────────► clear() ──────────────► lines.clear()        │
//! │                                                                         │
//! │  Print receipt ─────────► items() ──────────────► (snapshot copy)      │
//! │                                                                         │
//! │  NOTE: no cart operation fails. Misses are reported, never raised.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::money::Money;
use crate::types::{ProductId, ShelfListing};

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart together with how many units were picked.
///
/// ## Identity
/// Two lines are equal when their product ids match, whatever their price
/// or count. Hashing follows the same rule so lines can key sets and maps.
///
/// ## Clamping
/// Price and count are never negative: construction and decrement floor
/// them at zero instead of failing.
#[derive(Debug, Clone)]
pub struct CartLine {
    id: ProductId,
    name: String,
    price: Money,
    count: i64,
}

impl CartLine {
    /// Creates a cart line, flooring a negative price or count at zero.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, count: i64) -> Self {
        CartLine {
            id,
            name: name.into(),
            price: price.clamp_non_negative(),
            count: count.max(0),
        }
    }

    /// Starts a new cart line holding one unit of a shelf listing.
    ///
    /// The listing itself is left untouched; the cart owns its own copy.
    pub fn from_listing(listing: &ShelfListing) -> Self {
        CartLine::new(listing.id(), listing.name(), listing.price(), 1)
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

    #[inline]
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Adds one unit. No upper bound here; stock limits are enforced by the
    /// session before a unit is ever added.
    pub fn increment_count(&mut self) {
        self.count += 1;
    }

    /// Removes one unit, stopping at zero.
    pub fn decrement_count(&mut self) {
        self.count = (self.count - 1).max(0);
    }

    /// Unit price × count.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.count)
    }
}

impl PartialEq for CartLine {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CartLine {}

impl Hash for CartLine {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// `($3.00) milk`, matching the shelf rendering.
impl fmt::Display for CartLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.price, self.name)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - No two lines share a product id
/// - Lines keep the order in which their product was first added
///
/// Only `CartLine` values can be added, so the "not an item" case of a
/// dynamically typed cart cannot arise.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a line to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: that line's count goes up by exactly one,
    ///   whatever count the argument carries
    /// - Product not in cart: the line is appended with its own count
    pub fn add(&mut self, line: CartLine) {
        match self.lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => existing.increment_count(),
            None => self.lines.push(line),
        }
    }

    /// Removes the whole line for a product.
    ///
    /// ## Returns
    /// `true` if a line was removed, `false` if the product was not in the
    /// cart (nothing happens in that case).
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != product_id);
        self.lines.len() != before
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns an independent copy of the lines, in insertion order.
    pub fn items(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Units of a product currently in the cart (0 if absent).
    pub fn count_for(&self, product_id: ProductId) -> i64 {
        self.lines
            .iter()
            .find(|l| l.id == product_id)
            .map_or(0, CartLine::count)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of the line totals, before tax.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
