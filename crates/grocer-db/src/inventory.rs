//! # Inventory
//!
//! The read-through cache and mutation gateway in front of the catalog.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Lifecycle                                │
//! │                                                                         │
//! │  Inventory::open(config)                                               │
//! │       │  validate path ─────────────► DbError::Configuration           │
//! │       │  connect ───────────────────► DbError::ConnectionFailed        │
//! │       │  load aisle layout    ┐                                         │
//! │       │  load all quantities  ┘─────► DbError::QueryFailed             │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │  aisles:     { 1: "Dairy Products!", ... }   │  immutable           │
//! │  │  quantities: { 0: 20, 1: 20, ... }           │  decrement only      │
//! │  │  dirty:      { 0 }                           │  changed since open  │
//! │  └──────────────────────────────────────────────┘                      │
//! │       │                                                                 │
//! │       │  get_aisle_inventory(n) ──► always queries the catalog         │
//! │       │  decrement_quantity_for(id, n) ──► memory only, marks dirty    │
//! │       ▼                                                                 │
//! │  inventory.close().await                                               │
//! │       │  1. UPDATE dirty quantities (one transaction)                  │
//! │       │  2. close pool                                                  │
//! │       ▼                                                                 │
//! │  consumed: cannot flush twice                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Drop` cannot run async work, so an inventory dropped without `close`
//! only logs a warning; the pending quantities are lost.

use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::pool::{Database, DbConfig};
use grocer_core::{AisleLayout, AisleNumber, ProductId, ShelfListing};

/// Aisle layout plus live on-hand quantities for one shopping session.
#[derive(Debug)]
pub struct Inventory {
    db: Database,
    aisles: AisleLayout,
    quantities: HashMap<ProductId, i64>,
    dirty: BTreeSet<ProductId>,
    closed: bool,
}

impl Inventory {
    /// Opens the catalog described by `config` and loads it.
    ///
    /// ## Errors
    /// * `DbError::Configuration` - the path breaks the naming contract
    /// * anything in the connectivity family - the catalog cannot be opened
    ///   or read
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        let db = Database::new(config).await?;
        Self::load(db).await
    }

    /// Loads the aisle layout and every quantity from an open catalog.
    ///
    /// On failure the catalog is closed before the error is returned.
    pub async fn load(db: Database) -> DbResult<Self> {
        let (aisles, quantities) = match Self::read_catalog(&db).await {
            Ok(loaded) => loaded,
            Err(e) => {
                db.close().await;
                return Err(e);
            }
        };

        info!(
            aisles = aisles.len(),
            products = quantities.len(),
            "Inventory loaded"
        );

        Ok(Inventory {
            db,
            aisles,
            quantities,
            dirty: BTreeSet::new(),
            closed: false,
        })
    }

    async fn read_catalog(db: &Database) -> DbResult<(AisleLayout, HashMap<ProductId, i64>)> {
        let catalog = db.catalog();
        let aisles = catalog.aisle_layout().await?;
        let quantities = catalog.quantities().await?;
        Ok((aisles, quantities))
    }

    /// Returns a copy of the aisle layout.
    pub fn get_aisles(&self) -> AisleLayout {
        self.aisles.clone()
    }

    /// Queries the catalog for the products placed in `aisle`.
    ///
    /// Every call hits the catalog; caching belongs to the caller.
    pub async fn get_aisle_inventory(&self, aisle: AisleNumber) -> DbResult<Vec<ShelfListing>> {
        self.db.catalog().aisle_listings(aisle).await
    }

    /// Current on-hand quantity, or `None` for an unknown product.
    pub fn product_quantity_for(&self, product_id: ProductId) -> Option<i64> {
        self.quantities.get(&product_id).copied()
    }

    /// Reserves `amount` units of a product.
    ///
    /// Returns the new quantity, clamped at 0. Returns `None` without
    /// touching anything if `amount < 1` or the product is unknown.
    pub fn decrement_quantity_for(&mut self, product_id: ProductId, amount: i64) -> Option<i64> {
        if amount < 1 {
            return None;
        }

        let quantity = self.quantities.get_mut(&product_id)?;
        *quantity = (*quantity - amount).max(0);
        self.dirty.insert(product_id);

        debug!(
            product_id = product_id,
            amount = amount,
            remaining = *quantity,
            "Quantity reserved"
        );
        Some(*quantity)
    }

    /// Number of products whose quantity will be written back on close.
    pub fn pending_writes(&self) -> usize {
        self.dirty.len()
    }

    /// Writes changed quantities back and closes the catalog.
    ///
    /// The pool is closed even when the write fails; the write error is
    /// then returned.
    pub async fn close(mut self) -> DbResult<()> {
        let updates: Vec<(ProductId, i64)> = self
            .dirty
            .iter()
            .filter_map(|id| self.quantities.get(id).map(|q| (*id, *q)))
            .collect();

        let result = self.db.catalog().write_quantities(&updates).await;

        self.db.close().await;
        self.closed = true;

        match &result {
            Ok(rows) => info!(products = updates.len(), rows = rows, "Inventory flushed"),
            Err(e) => warn!(error = %e, "Inventory flush failed"),
        }

        result.map(|_| ())
    }
}

impl Drop for Inventory {
    fn drop(&mut self) {
        if !self.closed {
            warn!(
                pending = self.dirty.len(),
                "Inventory dropped without close; pending quantities not written"
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{seed_demo_catalog, DEFAULT_QUANTITY};
    use crate::DbError;

    async fn demo_inventory() -> Inventory {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_demo_catalog(&db.catalog(), DEFAULT_QUANTITY)
            .await
            .unwrap();
        Inventory::load(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_loads_layout_and_quantities() {
        let inventory = demo_inventory().await;

        let aisles = inventory.get_aisles();
        assert_eq!(aisles.len(), 4);
        assert_eq!(aisles[&1], "Dairy Products!");

        assert_eq!(inventory.product_quantity_for(0), Some(20));
        assert_eq!(inventory.product_quantity_for(15), Some(20));
        assert_eq!(inventory.product_quantity_for(99), None);

        inventory.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_aisle_inventory_is_fresh_each_call() {
        let inventory = demo_inventory().await;

        let first = inventory.get_aisle_inventory(1).await.unwrap();
        let second = inventory.get_aisle_inventory(1).await.unwrap();

        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
        assert!(inventory.get_aisle_inventory(42).await.unwrap().is_empty());

        inventory.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_decrement_not_applicable() {
        let mut inventory = demo_inventory().await;

        assert_eq!(inventory.decrement_quantity_for(0, 0), None);
        assert_eq!(inventory.decrement_quantity_for(0, -3), None);
        assert_eq!(inventory.decrement_quantity_for(99, 1), None);

        assert_eq!(inventory.product_quantity_for(0), Some(20));
        assert_eq!(inventory.pending_writes(), 0);

        inventory.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_decrement_clamps_at_zero() {
        let mut inventory = demo_inventory().await;

        assert_eq!(inventory.decrement_quantity_for(0, 3), Some(17));
        assert_eq!(inventory.decrement_quantity_for(1, 25), Some(0));
        assert_eq!(inventory.product_quantity_for(1), Some(0));
        assert_eq!(inventory.pending_writes(), 2);

        inventory.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_persists_quantities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        let db = Database::new(
            DbConfig::new(&path)
                .create_if_missing(true)
                .run_migrations(true),
        )
        .await
        .unwrap();
        seed_demo_catalog(&db.catalog(), DEFAULT_QUANTITY)
            .await
            .unwrap();
        db.close().await;

        let mut inventory = Inventory::open(DbConfig::new(&path)).await.unwrap();
        inventory.decrement_quantity_for(0, 3);
        inventory.close().await.unwrap();

        let reopened = Inventory::open(DbConfig::new(&path)).await.unwrap();
        assert_eq!(reopened.product_quantity_for(0), Some(17));
        assert_eq!(reopened.product_quantity_for(1), Some(20));
        reopened.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_spares_other_aisles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        let db = Database::new(
            DbConfig::new(&path)
                .create_if_missing(true)
                .run_migrations(true),
        )
        .await
        .unwrap();
        let catalog = db.catalog();
        catalog.insert_aisle(1, "Dairy").await.unwrap();
        catalog.insert_aisle(2, "Deli").await.unwrap();
        catalog
            .insert_product(0, "milk", grocer_core::Money::from_cents(300))
            .await
            .unwrap();
        catalog.place_product(0, 1, 20).await.unwrap();
        catalog.place_product(0, 2, 5).await.unwrap();
        db.close().await;

        let mut inventory = Inventory::open(DbConfig::new(&path)).await.unwrap();
        assert_eq!(inventory.product_quantity_for(0), Some(25));
        inventory.decrement_quantity_for(0, 1);
        inventory.close().await.unwrap();

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let placements: Vec<(i64, i64)> =
            sqlx::query_as("SELECT aisle, quantity FROM AisleProductPlacement ORDER BY aisle")
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert_eq!(placements, vec![(1, 19), (2, 5)]);
        db.close().await;
    }

    #[tokio::test]
    async fn test_open_rejects_bad_path() {
        let err = Inventory::open(DbConfig::new("inventory.sqlite"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_open_without_schema_is_connectivity_error() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let err = Inventory::load(db).await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
