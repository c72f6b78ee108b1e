//! # Error Types
//!
//! Domain error types for grocer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocer-core (this file)                                               │
//! │  └── ValidationError  - console input that cannot be used              │
//! │                         (always recovered by re-prompting)             │
//! │                                                                         │
//! │  grocer-db                                                             │
//! │  └── DbError          - bad store path, connection and query failures  │
//! │                                                                         │
//! │  shop app                                                              │
//! │  └── ShopError        - what ends the program                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart and stock no-ops are not errors at all; they are reported through
//! return values (`bool`, `Option`, [`Admission`](crate::session::Admission)).

use thiserror::Error;

/// Console input validation failures.
///
/// The messages are what the shopper sees before being asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input is not made of digits only.
    #[error("Only integers!")]
    NotAnInteger { input: String },

    /// Input is a number but outside the accepted bounds.
    #[error("Only integers between {min} and {max}.")]
    OutOfRange { value: i64, min: i64, max: i64 },
}
