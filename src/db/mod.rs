//! Database connection pool
//!
//! The pool is process-wide state: created once at startup, cloned into every
//! component that issues queries, and closed on shutdown. Connections are
//! checked out per statement and returned by the pool whether the statement
//! succeeds or fails.

mod schema;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;

pub use schema::{ensure_schema, SONGS_TABLE_DDL};

/// Connection pool wrapper
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool sized and timed by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;

        info!(
            url = %config.url,
            max_connections = config.max_connections,
            "database pool opened"
        );

        Ok(Self { pool })
    }

    /// Private in-memory database backed by a single long-lived connection.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool
    /// must never open a second one or recycle the first.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { pool })
    }

    /// Create the `songs` table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        ensure_schema(&self.pool).await
    }

    /// Shared pool handle
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for checked-out connections and close the pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
