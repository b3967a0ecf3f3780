//! # Database Handle
//!
//! Opens the Stitchbook SQLite file, applies the schema and hands out the
//! client and product repositories.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DB_PATH ──► DbConfig::new(path)                                       │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │  Database::new(config)                                                 │
//! │     ├── open (create file if missing)                                  │
//! │     ├── PRAGMA foreign_keys = ON   on every connection                 │
//! │     ├── journal WAL, busy timeout                                      │
//! │     └── embedded migrations (unless disabled)                          │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │  db.clients()  ──► ClientRepository   (clients table)                  │
//! │  db.products() ──► ProductRepository  (products, scoped by client_id)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting a client cascades to its products and is refused while invoices
//! reference it. Both rules live in the schema and only hold when every
//! connection has foreign keys switched on.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::client::ClientRepository;
use crate::repository::product::ProductRepository;

/// How long a request waits for a free connection before failing with
/// [`DbError::PoolExhausted`].
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// How long SQLite retries a locked database before returning `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives and how it is opened.
///
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./stitchbook.db").max_connections(8)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool size for file databases (default 5). In-memory databases always
    /// use a single connection.
    pub max_connections: u32,

    /// Apply embedded migrations on open (default true).
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            run_migrations: true,
        }
    }

    /// A private database that lives as long as the pool. Used by tests.
    pub fn in_memory() -> Self {
        DbConfig::new(MEMORY_PATH)
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared handle to the Stitchbook database.
///
/// Cloning is cheap; the API keeps one in its state and every handler
/// borrows repositories from it.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database and, unless disabled, brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening database");

        let options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        }
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

        // Each connection to `:memory:` is a separate database, so the
        // in-memory pool is pinned to one connection that is never recycled.
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies any embedded migrations that have not run yet.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Database schema is current");
        Ok(())
    }

    /// Embedded vs applied migration counts, for `/health`.
    pub async fn migration_status(&self) -> DbResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    /// Raw pool access. Prefer the repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Waits for in-flight queries, then closes every connection. Later
    /// repository calls fail with [`DbError::ConnectionFailed`].
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }

    /// True when a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
