//! In-memory key store.
//!
//! Used by tests and as a drop-in when persistence is not wanted. Data is
//! lost on restart.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{KeyRecord, KeyStore, StorageError};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<i64, KeyRecord>,
    last_id: i64,
}

/// In-memory key store implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, valid or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

#[async_trait]
impl KeyStore for MemoryStore {
    async fn insert(&self, material: &[u8], expires_at: i64) -> Result<i64, StorageError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.records.insert(
            id,
            KeyRecord {
                id,
                material: material.to_vec(),
                expires_at,
            },
        );
        debug!(kid = id, expires_at, "Stored key");
        Ok(id)
    }

    async fn all_valid_at(&self, now: i64) -> Result<Vec<KeyRecord>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .filter(|record| record.is_valid_at(now))
            .cloned()
            .collect())
    }
}
