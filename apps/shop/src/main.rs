//! # Greener Pastures Shop Entry Point
//!
//! ## Startup Sequence
//! 1. Parse flags (`--db`, `--receipt`)
//! 2. Initialize tracing (stderr)
//! 3. Resolve configuration
//! 4. Shop until the shopper leaves or Ctrl+C, then close the inventory

use clap::Parser;
use std::process::ExitCode;

use grocer_shop::config::{Args, ShopConfig};
use grocer_shop::error::ShopError;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    grocer_shop::init_tracing();

    let config = ShopConfig::from_args(args);

    match grocer_shop::run(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(ShopError::Interrupted) => {
            eprintln!("grocer-shop: interrupted");
            // A blocked stdin read cannot be cancelled and would hold up
            // runtime shutdown; the inventory is already closed.
            std::process::exit(130)
        }
        Err(e) => {
            eprintln!("grocer-shop: {}", e);
            ExitCode::FAILURE
        }
    }
}
