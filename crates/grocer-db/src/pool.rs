//! # Catalog Connection Management
//!
//! Opening and configuring the SQLite catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Connection                                 │
//! │                                                                         │
//! │  Shop startup                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← path must end with ".db"                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       │  1. validate()        → DbError::Configuration                 │
//! │       │  2. connect           → DbError::ConnectionFailed              │
//! │       │  3. migrate (opt-in)  → DbError::MigrationFailed               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────┐                                           │
//! │  │       SqlitePool        │                                           │
//! │  │  ┌─────┐                │   One shopper, one session:               │
//! │  │  │Conn1│                │   a single connection is plenty           │
//! │  │  └─────┘                │                                           │
//! │  └─────────────────────────┘                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Opening Someone Else's Catalog
//! The shop reads a catalog that is usually produced by a separate tool, so
//! the shop opens it with `create_if_missing(false)` and without migrations.
//! Only the seed binary creates and migrates.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::catalog::CatalogRepository;

/// File suffix every catalog path must carry.
pub const CATALOG_SUFFIX: &str = ".db";

// =============================================================================
// Configuration
// =============================================================================

/// Catalog configuration.
///
/// ## Example
/// ```rust
/// use grocer_db::DbConfig;
///
/// let config = DbConfig::new("grocery_store_inventory.db")
///     .create_if_missing(false)
///     .run_migrations(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite catalog file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 1
    pub max_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: false
    pub run_migrations: bool,

    /// Whether a missing file is created.
    /// Default: false
    pub create_if_missing: bool,

    in_memory: bool,
}

impl DbConfig {
    /// Creates a catalog configuration for an existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(30),
            run_migrations: false,
            create_if_missing: false,
            in_memory: false,
        }
    }

    /// Creates an in-memory catalog configuration (for testing).
    ///
    /// Migrations run so the schema exists; the catalog is empty until
    /// something inserts into it.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
            create_if_missing: true,
            in_memory: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets whether a missing catalog file is created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Whether this configuration targets an in-memory catalog.
    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// Checks the catalog naming contract.
    ///
    /// ## Rules
    /// - The path must end with `.db` (in-memory catalogs are exempt)
    pub fn validate(&self) -> DbResult<()> {
        if self.in_memory {
            return Ok(());
        }

        let path = self.database_path.to_string_lossy();
        if !path.ends_with(CATALOG_SUFFIX) {
            return Err(DbError::configuration(
                path.into_owned(),
                format!("catalog file must end with {}", CATALOG_SUFFIX),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Database
// =============================================================================

/// Catalog handle providing repository access.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Opens the catalog.
    ///
    /// ## What This Does
    /// 1. Checks the naming contract
    /// 2. Configures SQLite:
    ///    - WAL journal
    ///    - NORMAL synchronous
    /// 3. Creates the connection pool (connects eagerly so a missing file
    ///    fails here, not on the first query)
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use catalog handle
    /// * `Err(DbError)` - Bad path, connection or migration failure
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        config.validate()?;

        info!(
            path = %config.database_path.display(),
            in_memory = config.in_memory,
            "Opening catalog"
        );

        let base_options = if config.in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };
        let connect_options = base_options.create_if_missing(config.create_if_missing);

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout);

        if config.in_memory {
            // Dropping the last connection drops the whole catalog
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Catalog pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Idempotent: already applied migrations are skipped.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running catalog migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the catalog repository.
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    /// Closes the connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing catalog connection pool");
        self.pool.close().await;
    }

    /// Checks if the catalog can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
