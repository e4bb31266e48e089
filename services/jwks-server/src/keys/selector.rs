//! Signing key selection.

use tracing::debug;

use crate::storage::{KeyRecord, KeyStore, StorageError};

/// Pick the key to sign with at `now`.
///
/// Only keys with `expires_at > now` are eligible; among them the one with
/// the greatest expiry wins. There is no fallback to an expired key: `None`
/// means nothing may sign right now.
///
/// # Errors
///
/// Propagates store failures.
pub async fn select_signing_key(
    store: &dyn KeyStore,
    now: i64,
) -> Result<Option<KeyRecord>, StorageError> {
    let selected = store.most_recent_valid_at(now).await?;

    match &selected {
        Some(record) => debug!(kid = record.id, expires_at = record.expires_at, now, "Selected signing key"),
        None => debug!(now, "No valid signing key"),
    }

    Ok(selected)
}
