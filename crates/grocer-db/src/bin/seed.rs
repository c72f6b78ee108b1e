//! # Seed Catalog Generator
//!
//! Creates a catalog file and fills it with the Greener Pastures demo store.
//!
//! ## Usage
//! ```bash
//! # Create grocery_store_inventory.db in the current directory
//! cargo run -p grocer-db --bin seed
//!
//! # Custom path and stock level
//! cargo run -p grocer-db --bin seed -- --db ./data/store.db --quantity 5
//! ```
//!
//! Running it against a catalog that already has products changes nothing.

use clap::Parser;
use std::path::PathBuf;

use grocer_db::seed::{seed_demo_catalog, SeedOutcome, DEFAULT_QUANTITY};
use grocer_db::{Database, DbConfig};

/// Seed a Greener Pastures catalog.
#[derive(Debug, Parser)]
#[command(name = "seed", version, about)]
struct Args {
    /// Catalog file to create (must end with .db)
    #[arg(long, env = "GROCER_DB_PATH", default_value = "grocery_store_inventory.db")]
    db: PathBuf,

    /// On-hand quantity for every product
    #[arg(long, default_value_t = DEFAULT_QUANTITY)]
    quantity: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Greener Pastures Catalog Seeder");
    println!("===============================");
    println!("Database: {}", args.db.display());
    println!("Quantity: {}", args.quantity);
    println!();

    let config = DbConfig::new(&args.db)
        .create_if_missing(true)
        .run_migrations(true);
    let db = Database::new(config).await?;

    println!("✓ Connected to catalog");
    println!("✓ Migrations applied");

    let outcome = seed_demo_catalog(&db.catalog(), args.quantity).await;
    db.close().await;

    match outcome? {
        SeedOutcome::AlreadySeeded { existing } => {
            println!("⚠ Catalog already has {} products", existing);
            println!("  Skipping seed to avoid duplicates.");
            println!("  Delete the catalog file to regenerate.");
        }
        SeedOutcome::Seeded { aisles, products } => {
            println!("✓ Seeded {} aisles with {} products", aisles, products);
        }
    }

    Ok(())
}
