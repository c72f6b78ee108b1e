//! # Database Error Types
//!
//! Error types for catalog store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Catalog path check ──► DbError::Configuration  (before connecting)    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError::{ConnectionFailed, QueryFailed, ...} ← connectivity family   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShopError (in shop app) ← ends the program, never retried             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Catalog store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The catalog identifier does not meet the naming contract.
    ///
    /// ## When This Occurs
    /// - The path does not end with `.db`
    ///
    /// Raised by [`DbConfig::validate`](crate::DbConfig::validate) before
    /// any connection is attempted.
    #[error("Invalid catalog path '{path}': {reason}")]
    Configuration { path: String, reason: String },

    /// The catalog could not be opened.
    ///
    /// ## When This Occurs
    /// - File is missing and creation is disabled
    /// - File permissions issue
    /// - Pool closed or timed out
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A query against the catalog failed.
    ///
    /// ## When This Occurs
    /// - Missing table (the file is not a catalog)
    /// - Column type the catalog should not contain
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Writing quantities back did not commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl DbError {
    /// Creates a Configuration error for a catalog path.
    pub fn configuration(path: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the connectivity family (everything but
    /// a bad catalog path).
    pub fn is_connectivity(&self) -> bool {
        !matches!(self, DbError::Configuration { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::Io / Pool*     → DbError::ConnectionFailed
/// Other                       → DbError::QueryFailed
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::Io(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => DbError::ConnectionFailed(err.to_string()),

            _ => DbError::QueryFailed(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
