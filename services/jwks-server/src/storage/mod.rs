//! Key storage.
//!
//! A [`KeyStore`] maps integer key ids to private key material and an expiry
//! instant. Expiry is a query-time predicate (`expires_at > now`); nothing is
//! ever deleted implicitly.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use std::fmt::Debug;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Query or write failed
    #[error("Database error: {0}")]
    Database(String),

    /// Store could not be opened
    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// A persisted signing key.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Store-assigned identifier, published as the JWT `kid`
    pub id: i64,
    /// Serialized private key (PEM)
    pub material: Vec<u8>,
    /// Expiry as Unix seconds
    pub expires_at: i64,
}

impl KeyRecord {
    /// Whether this key may be used or published at `now`.
    #[must_use]
    pub const fn is_valid_at(&self, now: i64) -> bool {
        self.expires_at > now
    }
}

// Private material stays out of logs.
impl Debug for KeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRecord")
            .field("id", &self.id)
            .field("material", &format_args!("<{} bytes>", self.material.len()))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Storage backend for signing keys.
///
/// Implementations must be thread-safe. Identifier assignment in
/// [`KeyStore::insert`] is serialized by the store itself, so concurrent
/// inserts never produce duplicate ids.
#[async_trait]
pub trait KeyStore: Send + Sync + Debug {
    /// Persist a new key and return its assigned id.
    async fn insert(&self, material: &[u8], expires_at: i64) -> Result<i64, StorageError>;

    /// Every record with `expires_at > now`, in no particular order.
    async fn all_valid_at(&self, now: i64) -> Result<Vec<KeyRecord>, StorageError>;

    /// The valid record with the greatest `expires_at`, if any.
    ///
    /// Ties on `expires_at` resolve to the highest id.
    async fn most_recent_valid_at(&self, now: i64) -> Result<Option<KeyRecord>, StorageError> {
        let records = self.all_valid_at(now).await?;
        Ok(records
            .into_iter()
            .filter(|record| record.is_valid_at(now))
            .max_by_key(|record| (record.expires_at, record.id)))
    }
}
