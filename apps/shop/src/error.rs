//! # Shop Error Type
//!
//! What can end a shopping run.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shop                               │
//! │                                                                         │
//! │  Bad console input ──► re-prompt (never reaches this type)             │
//! │  Cart / stock no-op ──► message or silence (never reaches this type)   │
//! │                                                                         │
//! │  DbError ───────────┐                                                   │
//! │  console io::Error ─┼──► ShopError ──► main: close inventory,          │
//! │  receipt write ─────┤                  print error, exit 1             │
//! │  Ctrl+C / SIGTERM ──┘                  (exit 130 when interrupted)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use grocer_db::DbError;

/// Fatal shop errors. Nothing here is retried.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Catalog configuration or connectivity failure.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Reading from or writing to the console failed.
    #[error("Console I/O failed: {0}")]
    Console(#[from] std::io::Error),

    /// The receipt file could not be written.
    #[error("Could not write receipt to {path}: {source}")]
    ReceiptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ctrl+C or SIGTERM arrived before the shopper left.
    #[error("Interrupted")]
    Interrupted,
}

/// Result type for shop operations.
pub type ShopResult<T> = Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_errors_pass_through() {
        let err: ShopError =
            DbError::configuration("x.txt", "catalog file must end with .db").into();
        assert_eq!(
            err.to_string(),
            "Invalid catalog path 'x.txt': catalog file must end with .db"
        );
    }

    #[test]
    fn test_receipt_write_names_path() {
        let err = ShopError::ReceiptWrite {
            path: PathBuf::from("/nowhere/Receipt.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert!(err.to_string().contains("/nowhere/Receipt.txt"));
    }
}
