//! # Repository Module
//!
//! SQL for the grocery catalog lives here and nowhere else.
//!
//! ```text
//! Inventory / seed
//!      │
//!      │  db.catalog().aisle_listings(1)
//!      ▼
//! CatalogRepository
//! ├── aisle_layout()
//! ├── aisle_listings(aisle)
//! ├── quantities()
//! ├── write_quantities(updates)
//! └── insert_aisle / insert_product / place_product
//!      │
//!      ▼
//! SQLite catalog
//! ```

pub mod catalog;
