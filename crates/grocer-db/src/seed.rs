//! # Demo Catalog
//!
//! The four-aisle Greener Pastures catalog used by the `seed` binary and by
//! tests that need a realistic store.
//!
//! ```text
//!  Aisle 1  Dairy Products!                  milk, cheese, yogurt, cream cheese
//!  Aisle 2  Fruits!                          bag of apples, cherries, ...
//!  Aisle 3  Shirts, Shoes, and More!         shirt, pants, shoes, bathroom robe
//!  Aisle 4  Showers Gels and Fresh Smells!   toothpaste, shower gel, ...
//! ```
//!
//! Product ids start at 0 and run across aisles in order; aisle numbers
//! start at 1. Prices are fixed so every seeded catalog is identical.

use tracing::info;

use crate::error::DbResult;
use crate::repository::catalog::{CatalogRepository, PlacedProduct};
use grocer_core::{AisleNumber, Money};

/// On-hand quantity each product starts with.
pub const DEFAULT_QUANTITY: i64 = 20;

/// One aisle of the demo catalog: number, description, (name, price in cents).
pub type DemoAisle = (AisleNumber, &'static str, &'static [(&'static str, i64)]);

/// The demo catalog.
pub const DEMO_AISLES: &[DemoAisle] = &[
    (
        1,
        "Dairy Products!",
        &[
            ("milk", 300),
            ("cheese", 499),
            ("yogurt", 250),
            ("cream cheese", 325),
        ],
    ),
    (
        2,
        "Fruits!",
        &[
            ("bag of apples", 545),
            ("cherries", 750),
            ("bag of peaches", 425),
            ("grapes", 345),
        ],
    ),
    (
        3,
        "Shirts, Shoes, and More!",
        &[
            ("shirt", 1650),
            ("pants", 2499),
            ("shoes", 3465),
            ("bathroom robe", 2999),
        ],
    ),
    (
        4,
        "Showers Gels and Fresh Smells!",
        &[
            ("toothpaste", 799),
            ("shower gel", 949),
            ("shampoo", 1299),
            ("conditioner", 1999),
        ],
    ),
];

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog already had products; nothing was written.
    AlreadySeeded { existing: i64 },
    /// Aisles and products were inserted.
    Seeded { aisles: usize, products: usize },
}

/// Inserts the demo catalog unless the catalog already holds products.
///
/// The whole catalog goes in as one transaction, so a failed run leaves the
/// catalog empty and a later run seeds it again.
pub async fn seed_demo_catalog(
    catalog: &CatalogRepository,
    quantity: i64,
) -> DbResult<SeedOutcome> {
    let existing = catalog.count_products().await?;
    if existing > 0 {
        info!(existing = existing, "Catalog already seeded");
        return Ok(SeedOutcome::AlreadySeeded { existing });
    }

    let aisles: Vec<(AisleNumber, &str)> = DEMO_AISLES
        .iter()
        .map(|(aisle, description, _)| (*aisle, *description))
        .collect();

    let products: Vec<PlacedProduct<'_>> = DEMO_AISLES
        .iter()
        .flat_map(|(aisle, _, products)| {
            products.iter().map(move |(name, cents)| (*aisle, *name, *cents))
        })
        .zip(0..)
        .map(|((aisle, name, cents), id)| PlacedProduct {
            id,
            name,
            price: Money::from_cents(cents),
            aisle,
            quantity,
        })
        .collect();

    catalog.insert_catalog(&aisles, &products).await?;

    info!(
        aisles = aisles.len(),
        products = products.len(),
        "Demo catalog seeded"
    );

    Ok(SeedOutcome::Seeded {
        aisles: aisles.len(),
        products: products.len(),
    })
}
