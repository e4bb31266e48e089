//! SQLite storage backend
//!
//! Persistent key storage in a single `keys` table:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS keys(
//!     kid INTEGER PRIMARY KEY AUTOINCREMENT,
//!     key BLOB NOT NULL,
//!     exp INTEGER NOT NULL
//! );
//! ```
//!
//! `AUTOINCREMENT` makes SQLite the serialization point for ids and keeps
//! ids of removed rows from ever being handed out again.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::{KeyRecord, KeyStore, StorageError};

/// SQLite key store implementation
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the file cannot be opened and
    /// [`StorageError::Database`] if the schema cannot be created.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        info!(path = %path.display(), "Connected to SQLite key store");

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Open a private in-memory database.
    ///
    /// The pool is pinned to one connection that never idles out, since each
    /// SQLite connection to `:memory:` is its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot be initialised.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Close the pool. Subsequent calls fail with [`StorageError::Database`].
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS keys(
                kid INTEGER PRIMARY KEY AUTOINCREMENT,
                key BLOB NOT NULL,
                exp INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn record_from_row(row: &SqliteRow) -> Result<KeyRecord, StorageError> {
        Ok(KeyRecord {
            id: row.try_get("kid")?,
            material: row.try_get("key")?,
            expires_at: row.try_get("exp")?,
        })
    }
}

#[async_trait]
impl KeyStore for SqliteStore {
    async fn insert(&self, material: &[u8], expires_at: i64) -> Result<i64, StorageError> {
        let result = sqlx::query("INSERT INTO keys (key, exp) VALUES (?, ?)")
            .bind(material)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(kid = id, expires_at, "Stored key");
        Ok(id)
    }

    async fn all_valid_at(&self, now: i64) -> Result<Vec<KeyRecord>, StorageError> {
        // Rows written by older deployments hold PEM text; CAST reads both.
        let rows = sqlx::query("SELECT kid, CAST(key AS BLOB) AS key, exp FROM keys WHERE exp > ?")
            .bind(now)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::record_from_row).collect()
    }
}
