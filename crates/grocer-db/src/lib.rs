//! # grocer-db: Catalog Store and Inventory for Greener Pastures
//!
//! Everything the shop knows about aisles, shelves and stock comes through
//! this crate. It uses SQLite via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Greener Pastures Data Flow                          │
//! │                                                                         │
//! │  Session (shop app)                                                    │
//! │       │  get_aisles / get_aisle_inventory / decrement_quantity_for     │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   grocer-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Inventory   │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │ (inventory.rs)│───►│ (catalog.rs)  │    │  (embedded)  │  │   │
//! │  │   │ layout, qty,  │    │ raw SQL       │    │ 001_catalog  │  │   │
//! │  │   │ flush-on-close│    │               │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           └──────► Database (pool.rs) ◄─┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            SQLite catalog: grocery_store_inventory.db           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Catalog configuration and connection pool
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Database error types
//! - [`repository`] - SQL against the catalog tables
//! - [`inventory`] - Aisle layout, live quantities, write-back on close
//! - [`seed`] - The demo catalog
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grocer_db::{DbConfig, Inventory};
//!
//! let mut inventory = Inventory::open(DbConfig::new("grocery_store_inventory.db")).await?;
//! let dairy = inventory.get_aisle_inventory(1).await?;
//! inventory.decrement_quantity_for(dairy[0].id(), 2);
//! inventory.close().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use inventory::Inventory;
pub use pool::{Database, DbConfig};
pub use repository::catalog::CatalogRepository;
