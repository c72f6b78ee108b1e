//! # Shop Configuration
//!
//! Where the catalog lives, where the receipt goes, and what the receipt
//! header says.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--receipt`), which also read
//!    `GROCER_DB_PATH` / `GROCER_RECEIPT_PATH`
//! 2. Environment variables (`GROCER_STORE_NAME`, `GROCER_CASHIER`)
//! 3. Defaults (this file)
//!
//! The sales tax rate is not configurable; every receipt uses the store
//! rate of 9.28%. Configuration is read-only once the session starts.

use clap::Parser;
use std::path::PathBuf;

use grocer_core::TaxRate;
use grocer_db::DbConfig;

/// Default catalog file.
pub const DEFAULT_DB_PATH: &str = "grocery_store_inventory.db";

/// Default receipt file, overwritten at every checkout.
pub const DEFAULT_RECEIPT_PATH: &str = "Receipt.txt";

// =============================================================================
// Command Line
// =============================================================================

/// Shop at Greener Pastures Grocery Store.
#[derive(Debug, Clone, Parser)]
#[command(name = "grocer-shop", version, about)]
pub struct Args {
    /// Catalog file (must end with .db)
    #[arg(long, env = "GROCER_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Where the receipt is written at checkout
    #[arg(long, env = "GROCER_RECEIPT_PATH", default_value = DEFAULT_RECEIPT_PATH)]
    pub receipt: PathBuf,
}

// =============================================================================
// ShopConfig
// =============================================================================

/// Shop configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Catalog file.
    pub db_path: PathBuf,

    /// Receipt file.
    pub receipt_path: PathBuf,

    /// Store name (first receipt line)
    pub store_name: String,

    /// Store address lines (for receipts)
    pub store_address: Vec<String>,

    /// Store phone (for receipts)
    pub store_phone: String,

    /// Name printed after `Cashier:`
    pub cashier: String,
}

impl Default for ShopConfig {
    /// ## Default Values
    /// - Catalog: `grocery_store_inventory.db`
    /// - Receipt: `Receipt.txt`
    /// - Store: Greener Pastures Grocery Store, San Jose
    fn default() -> Self {
        ShopConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            receipt_path: PathBuf::from(DEFAULT_RECEIPT_PATH),
            store_name: "Greener Pastures Grocery Store".to_string(),
            store_address: vec![
                "9090 Lake Ontario Dr.".to_string(),
                "San Jose, CA 95134".to_string(),
            ],
            store_phone: "(408) 555 - 4545".to_string(),
            cashier: "Nazeer".to_string(),
        }
    }
}

impl ShopConfig {
    /// Builds the configuration from parsed flags and the environment.
    pub fn from_args(args: Args) -> Self {
        let mut config = ShopConfig::from_env();
        config.db_path = args.db;
        config.receipt_path = args.receipt;
        config
    }

    /// Defaults with `GROCER_*` environment overrides applied.
    ///
    /// ## Environment Variables
    /// - `GROCER_STORE_NAME`: Override store name
    /// - `GROCER_CASHIER`: Override cashier name
    pub fn from_env() -> Self {
        ShopConfig::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(store_name) = lookup("GROCER_STORE_NAME") {
            self.store_name = store_name;
        }

        if let Some(cashier) = lookup("GROCER_CASHIER") {
            self.cashier = cashier;
        }

        self
    }

    /// The sales tax rate: always the store rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::default()
    }

    /// Catalog settings for the shop: an existing file, no migrations.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path)
            .create_if_missing(false)
            .run_migrations(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.db_path, PathBuf::from("grocery_store_inventory.db"));
        assert_eq!(config.receipt_path, PathBuf::from("Receipt.txt"));
        assert_eq!(config.tax_rate().bps(), 928);
        assert_eq!(config.store_address.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = ShopConfig::default().with_overrides(lookup(&[
            ("GROCER_STORE_NAME", "Corner Market"),
            ("GROCER_CASHIER", "Robin"),
        ]));

        assert_eq!(config.store_name, "Corner Market");
        assert_eq!(config.cashier, "Robin");
    }

    #[test]
    fn test_tax_rate_is_not_configurable() {
        let config =
            ShopConfig::default().with_overrides(lookup(&[("GROCER_TAX_RATE", "8.25")]));
        assert_eq!(config.tax_rate().bps(), 928);
    }

    #[test]
    fn test_args_set_paths() {
        let args = Args::parse_from(["grocer-shop", "--db", "other.db", "--receipt", "out.txt"]);
        let config = ShopConfig::from_args(args);

        assert_eq!(config.db_path, PathBuf::from("other.db"));
        assert_eq!(config.receipt_path, PathBuf::from("out.txt"));
        assert!(config.db_config().validate().is_ok());
    }
}
