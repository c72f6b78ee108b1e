//! # Catalog Repository
//!
//! Reads aisles, shelves and quantities; writes quantities back.
//!
//! ## Tables Touched
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Aisle                      AisleProductPlacement        Product        │
//! │  ┌─────────────────────┐    ┌──────────────────────┐    ┌───────────┐  │
//! │  │ aisleNumber (1..)   │◄───│ aisle                │    │ ID (0..)  │  │
//! │  │ description         │    │ product              │───►│ name      │  │
//! │  └─────────────────────┘    │ quantity             │    │ price     │  │
//! │                             └──────────────────────┘    └───────────┘  │
//! │                                                                         │
//! │  aisle_layout()     ── SELECT * FROM Aisle                             │
//! │  aisle_listings(n)  ── Product ⋈ Placement WHERE aisle = n             │
//! │  quantities()       ── SUM(quantity) per product                       │
//! │  write_quantities() ── UPDATE Placement ... (one transaction)          │
//! │  insert_catalog()   ── INSERT aisles, products, placements (one tx)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are stored as dollars. They are read through `CAST(... AS REAL)`
//! because SQLite hands back whole-dollar prices as integers otherwise.
//!
//! ## Products in Several Aisles
//! The shop tracks one on-hand quantity per product: the sum over all of its
//! placement rows. Writing back takes the reduction out of the placement rows
//! in `rowid` order, so each aisle keeps its own count.

use sqlx::{FromRow, SqliteConnection, SqlitePool};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{DbError, DbResult};
use grocer_core::{AisleLayout, AisleNumber, Money, ProductId, ShelfListing};

#[derive(Debug, FromRow)]
struct AisleRow {
    aisle_number: i64,
    description: String,
}

#[derive(Debug, FromRow)]
struct ListingRow {
    id: i64,
    name: String,
    price: f64,
}

impl From<ListingRow> for ShelfListing {
    fn from(row: ListingRow) -> Self {
        ShelfListing::new(row.id, row.name, Money::from_catalog_price(row.price))
    }
}

/// A product to insert, with the aisle it goes in and its on-hand quantity.
#[derive(Debug, Clone)]
pub struct PlacedProduct<'a> {
    pub id: ProductId,
    pub name: &'a str,
    pub price: Money,
    pub aisle: AisleNumber,
    pub quantity: i64,
}

/// Repository for catalog reads and quantity write-back.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Reads every aisle, keyed by aisle number.
    pub async fn aisle_layout(&self) -> DbResult<AisleLayout> {
        let rows: Vec<AisleRow> = sqlx::query_as(
            r#"
            SELECT aisleNumber AS aisle_number, description
            FROM Aisle
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded aisle layout");

        Ok(rows
            .into_iter()
            .map(|row| (row.aisle_number, row.description))
            .collect())
    }

    /// Reads the products placed in one aisle, in the order the catalog
    /// returns them. An unknown aisle yields an empty shelf.
    pub async fn aisle_listings(&self, aisle: AisleNumber) -> DbResult<Vec<ShelfListing>> {
        let rows: Vec<ListingRow> = sqlx::query_as(
            r#"
            SELECT
                p.ID AS id,
                p.name AS name,
                CAST(p.price AS REAL) AS price
            FROM Product p, AisleProductPlacement app
            WHERE p.ID = app.product
            AND app.aisle = ?1
            "#,
        )
        .bind(aisle)
        .fetch_all(&self.pool)
        .await?;

        debug!(aisle = aisle, count = rows.len(), "Loaded shelf");

        Ok(rows.into_iter().map(ShelfListing::from).collect())
    }

    /// Reads the on-hand quantity of every placed product, summed over the
    /// aisles it is placed in.
    pub async fn quantities(&self) -> DbResult<HashMap<ProductId, i64>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT product, SUM(quantity)
            FROM AisleProductPlacement
            GROUP BY product
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Writes per-product quantities back in a single transaction.
    ///
    /// Each product's placement rows are brought to the new total by
    /// [`spread_quantity`]. Returns the number of placement rows changed.
    pub async fn write_quantities(&self, updates: &[(ProductId, i64)]) -> DbResult<u64> {
        if updates.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut rows_affected = 0;
        for (product, quantity) in updates {
            let placements: Vec<(i64, i64)> = sqlx::query_as(
                r#"
                SELECT rowid, quantity
                FROM AisleProductPlacement
                WHERE product = ?1
                ORDER BY rowid
                "#,
            )
            .bind(product)
            .fetch_all(&mut *tx)
            .await?;

            for (rowid, row_quantity) in spread_quantity(&placements, *quantity) {
                let result =
                    sqlx::query("UPDATE AisleProductPlacement SET quantity = ?1 WHERE rowid = ?2")
                        .bind(row_quantity)
                        .bind(rowid)
                        .execute(&mut *tx)
                        .await?;
                rows_affected += result.rows_affected();
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(
            products = updates.len(),
            rows = rows_affected,
            "Quantities written back"
        );
        Ok(rows_affected)
    }

    /// Counts products (for diagnostics and seeding).
    pub async fn count_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Product")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Catalog Authoring
    // =========================================================================

    /// Inserts an aisle.
    pub async fn insert_aisle(&self, aisle: AisleNumber, description: &str) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        insert_aisle_row(&mut conn, aisle, description).await
    }

    /// Inserts a product with a dollar price.
    pub async fn insert_product(&self, id: ProductId, name: &str, price: Money) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        insert_product_row(&mut conn, id, name, price).await
    }

    /// Places a product in an aisle with an on-hand quantity.
    pub async fn place_product(
        &self,
        product: ProductId,
        aisle: AisleNumber,
        quantity: i64,
    ) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        place_product_row(&mut conn, product, aisle, quantity).await
    }

    /// Inserts aisles and placed products in one transaction.
    ///
    /// Either everything is inserted or, on any failure, nothing is.
    pub async fn insert_catalog(
        &self,
        aisles: &[(AisleNumber, &str)],
        products: &[PlacedProduct<'_>],
    ) -> DbResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for (aisle, description) in aisles {
            insert_aisle_row(&mut tx, *aisle, description).await?;
        }

        for product in products {
            insert_product_row(&mut tx, product.id, product.name, product.price).await?;
            place_product_row(&mut tx, product.id, product.aisle, product.quantity).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(
            aisles = aisles.len(),
            products = products.len(),
            "Catalog inserted"
        );
        Ok(())
    }
}

async fn insert_aisle_row(
    conn: &mut SqliteConnection,
    aisle: AisleNumber,
    description: &str,
) -> DbResult<()> {
    sqlx::query("INSERT INTO Aisle (aisleNumber, description) VALUES (?1, ?2)")
        .bind(aisle)
        .bind(description)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

async fn insert_product_row(
    conn: &mut SqliteConnection,
    id: ProductId,
    name: &str,
    price: Money,
) -> DbResult<()> {
    sqlx::query("INSERT INTO Product (ID, name, price) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(name)
        .bind(price.cents() as f64 / 100.0)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

async fn place_product_row(
    conn: &mut SqliteConnection,
    product: ProductId,
    aisle: AisleNumber,
    quantity: i64,
) -> DbResult<()> {
    sqlx::query("INSERT INTO AisleProductPlacement (product, aisle, quantity) VALUES (?1, ?2, ?3)")
        .bind(product)
        .bind(aisle)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Brings a product's placement rows to a new total.
///
/// `placements` are `(rowid, quantity)` pairs in `rowid` order. A reduction
/// is taken from the rows in order, never pushing a row below zero. An
/// increase goes to the first row. Returns only the rows that change.
pub fn spread_quantity(placements: &[(i64, i64)], total: i64) -> Vec<(i64, i64)> {
    let stored: i64 = placements.iter().map(|(_, quantity)| quantity).sum();
    let mut changes = Vec::new();

    if total > stored {
        if let Some(&(rowid, quantity)) = placements.first() {
            changes.push((rowid, quantity + (total - stored)));
        }
        return changes;
    }

    let mut excess = stored - total;
    for &(rowid, quantity) in placements {
        if excess == 0 {
            break;
        }
        let taken = excess.min(quantity.max(0));
        if taken > 0 {
            changes.push((rowid, quantity - taken));
            excess -= taken;
        }
    }

    changes
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn dairy_catalog() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();

        catalog.insert_aisle(1, "Dairy Products!").await.unwrap();
        catalog.insert_aisle(2, "Fruits!").await.unwrap();
        catalog
            .insert_product(0, "milk", Money::from_cents(300))
            .await
            .unwrap();
        catalog
            .insert_product(1, "cheese", Money::from_cents(499))
            .await
            .unwrap();
        catalog.place_product(0, 1, 20).await.unwrap();
        catalog.place_product(1, 1, 5).await.unwrap();

        db
    }

    #[tokio::test]
    async fn test_aisle_layout() {
        let db = dairy_catalog().await;

        let layout = db.catalog().aisle_layout().await.unwrap();

        assert_eq!(layout.len(), 2);
        assert_eq!(layout[&1], "Dairy Products!");
        assert_eq!(layout[&2], "Fruits!");
    }

    #[tokio::test]
    async fn test_aisle_listings_reads_whole_dollar_prices() {
        let db = dairy_catalog().await;

        let shelf = db.catalog().aisle_listings(1).await.unwrap();

        assert_eq!(shelf.len(), 2);
        let milk = shelf.iter().find(|l| l.id() == 0).unwrap();
        assert_eq!(milk.name(), "milk");
        assert_eq!(milk.price(), Money::from_cents(300));
        let cheese = shelf.iter().find(|l| l.id() == 1).unwrap();
        assert_eq!(cheese.price(), Money::from_cents(499));
    }

    #[tokio::test]
    async fn test_empty_and_unknown_aisles() {
        let db = dairy_catalog().await;

        assert!(db.catalog().aisle_listings(2).await.unwrap().is_empty());
        assert!(db.catalog().aisle_listings(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_quantities() {
        let db = dairy_catalog().await;
        let catalog = db.catalog();

        let rows = catalog.write_quantities(&[(0, 17), (1, 0)]).await.unwrap();
        assert_eq!(rows, 2);

        let quantities = catalog.quantities().await.unwrap();
        assert_eq!(quantities[&0], 17);
        assert_eq!(quantities[&1], 0);

        assert_eq!(catalog.write_quantities(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_product_in_two_aisles_keeps_both_counts() {
        let db = dairy_catalog().await;
        let catalog = db.catalog();
        catalog.place_product(0, 2, 5).await.unwrap();

        let quantities = catalog.quantities().await.unwrap();
        assert_eq!(quantities[&0], 25);

        let rows = catalog.write_quantities(&[(0, 24)]).await.unwrap();
        assert_eq!(rows, 1);

        let placements: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT aisle, quantity FROM AisleProductPlacement WHERE product = 0 ORDER BY aisle",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
        assert_eq!(placements, vec![(1, 19), (2, 5)]);
        assert_eq!(catalog.quantities().await.unwrap()[&0], 24);
    }

    #[test]
    fn test_spread_quantity() {
        let rows = [(1, 20), (2, 5)];

        assert_eq!(spread_quantity(&rows, 25), vec![]);
        assert_eq!(spread_quantity(&rows, 22), vec![(1, 17)]);
        // Draining the first row moves on to the next
        assert_eq!(spread_quantity(&rows, 3), vec![(1, 0), (2, 3)]);
        assert_eq!(spread_quantity(&rows, 0), vec![(1, 0), (2, 0)]);
        assert_eq!(spread_quantity(&[(1, 0), (2, 5)], 4), vec![(2, 4)]);
        assert_eq!(spread_quantity(&rows, 27), vec![(1, 22)]);
        assert_eq!(spread_quantity(&[], 3), vec![]);
    }

    #[tokio::test]
    async fn test_insert_catalog_is_all_or_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        catalog.insert_aisle(2, "Fruits!").await.unwrap();

        let products = [PlacedProduct {
            id: 0,
            name: "milk",
            price: Money::from_cents(300),
            aisle: 1,
            quantity: 20,
        }];

        // Aisle 2 already exists, so the second insert fails
        let err = catalog
            .insert_catalog(&[(1, "Dairy Products!"), (2, "Fruits!")], &products)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));

        let layout = catalog.aisle_layout().await.unwrap();
        assert_eq!(layout.keys().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(catalog.count_products().await.unwrap(), 0);

        catalog
            .insert_catalog(&[(1, "Dairy Products!")], &products)
            .await
            .unwrap();
        assert_eq!(catalog.count_products().await.unwrap(), 1);
        assert_eq!(catalog.quantities().await.unwrap()[&0], 20);
    }

    #[tokio::test]
    async fn test_missing_tables_are_query_failures() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let err = db.catalog().aisle_layout().await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
    }
}
