//! # grocer-core: Pure Shopping Logic for Greener Pastures
//!
//! This crate holds every rule of the grocery simulator that can be stated
//! without touching a database, a console or a file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Greener Pastures Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shop app (console)                           │   │
//! │  │    Aisles ──► Shelf ──► Add item ──► Checkout ──► Receipt      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  session  │  │   │
//! │  │   │  Listing  │  │   Money   │  │   Cart    │  │  states   │  │   │
//! │  │   │  TaxRate  │  │  tax math │  │ CartLine  │  │ admission │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CONSOLE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                grocer-db (Catalog Store + Inventory)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Shelf listings, ids, aisle layout, tax rate
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart lines and the cart
//! - [`receipt`] - Subtotal / tax / total
//! - [`session`] - Shopping state machine and stock admission
//! - [`validation`] - Console input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use grocer_core::{admit, Admission, Cart, CartLine, Money, ShelfListing};
//!
//! let milk = ShelfListing::new(0, "milk", Money::from_cents(300));
//! let mut cart = Cart::new();
//!
//! let on_hand = Some(1);
//! if admit(cart.count_for(milk.id()), on_hand) == Admission::Admit {
//!     cart.add(CartLine::from_listing(&milk));
//! }
//! assert_eq!(admit(cart.count_for(milk.id()), on_hand), Admission::MaxReached);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use error::ValidationError;
pub use money::Money;
pub use receipt::ReceiptTotals;
pub use session::{admit, transition, Admission, Effect, ShelfCommand, ShopEvent, ShopState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Store sales tax: 9.28%, in basis points.
pub const STORE_TAX_RATE_BPS: u32 = 928;
