//! # Greener Pastures Shop
//!
//! Console grocery shopping over a SQLite catalog.
//!
//! ## Module Organization
//! ```text
//! grocer_shop/
//! ├── lib.rs          ◄─── You are here (startup, teardown)
//! ├── config.rs       ◄─── Flags, GROCER_* env, defaults
//! ├── console.rs      ◄─── Prompts, aisle directory, shelf text
//! ├── session.rs      ◄─── State machine driver
//! ├── receipt.rs      ◄─── Receipt layout and file
//! └── error.rs        ◄─── ShopError
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Open Inventory ──────────────────────────────────────────────────► │
//! │     • path must end with .db, file must exist                           │
//! │     • aisle layout and quantities loaded                                │
//! │                                                                         │
//! │  2. Session::run() ──────────────────────────────────────────────────► │
//! │     • aisles → shelf → add items → checkout → leave                     │
//! │     • raced against Ctrl+C / SIGTERM                                    │
//! │                                                                         │
//! │  3. Inventory::close() ──────────────────────────────────────────────► │
//! │     • ALWAYS runs: success, failure or interruption                     │
//! │     • writes reserved quantities back, releases the connection          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod receipt;
pub mod session;

use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::ShopConfig;
use error::{ShopError, ShopResult};
use grocer_db::Inventory;
use receipt::Receipt;
use session::Session;

/// Runs one shopping session on stdin/stdout until it ends or the process is
/// asked to stop.
pub async fn run(config: ShopConfig) -> ShopResult<Option<Receipt>> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    run_with_io(config, stdin, stdout.lock(), shutdown_signal()).await
}

/// Runs one shopping session on the given console streams.
///
/// The session ends early with [`ShopError::Interrupted`] once `interrupt`
/// completes. The inventory is closed on every path out of the session, so
/// reserved quantities are written back even when the session fails or is
/// interrupted.
pub async fn run_with_io<R, W>(
    config: ShopConfig,
    input: R,
    output: W,
    interrupt: impl Future<Output = ()>,
) -> ShopResult<Option<Receipt>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!(
        db = %config.db_path.display(),
        receipt = %config.receipt_path.display(),
        "Opening the store"
    );

    let mut inventory = Inventory::open(config.db_config()).await?;

    let outcome = {
        let mut session = Session::new(&mut inventory, &config, input, output);
        tokio::select! {
            biased;
            _ = interrupt => {
                warn!("Session interrupted");
                Err(ShopError::Interrupted)
            }
            outcome = session.run() => outcome,
        }
    };

    let closed = inventory.close().await;

    match (outcome, closed) {
        (Ok(receipt), Ok(())) => Ok(receipt),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "Inventory close failed after session error");
            }
            Err(e)
        }
    }
}

/// Completes on Ctrl+C, or on SIGTERM where there is one.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Initializes tracing to stderr.
///
/// ## Log Levels
/// Default is `warn` so the console stays clean; set `RUST_LOG` (for
/// example `RUST_LOG=grocer=debug`) for more.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Tests
// =============================================================================
