//! Startup key seeding.
//!
//! Before the listener is bound the store receives two fresh keys: one valid
//! for an hour and one that expired an hour ago. The expired key keeps the
//! expiry filters in the issuance and discovery paths honest.

use std::sync::Arc;
use tracing::info;

use super::generator::{KeyGenerator, generate_off_runtime};
use crate::error::ServiceError;
use crate::storage::KeyStore;

/// Lifetime of the valid seed key, and age of the expired one.
pub const SEED_KEY_LIFETIME_SECS: i64 = 3600;

/// Ids assigned to the seeded keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Key expiring `now + 3600`
    pub valid_kid: i64,
    /// Key that expired at `now - 3600`
    pub expired_kid: i64,
}

/// Generate and persist the startup keys.
///
/// # Errors
///
/// Returns [`ServiceError::KeyGen`] if either keypair cannot be generated and
/// [`ServiceError::Storage`] if a write fails. Both are fatal at startup.
pub async fn seed_keys(
    store: &dyn KeyStore,
    generator: Arc<dyn KeyGenerator>,
    now: i64,
) -> Result<SeedReport, ServiceError> {
    let (valid, expired) = tokio::try_join!(
        generate_off_runtime(generator.clone()),
        generate_off_runtime(generator),
    )?;

    let valid_kid = store
        .insert(&valid.export_private()?, now + SEED_KEY_LIFETIME_SECS)
        .await?;
    let expired_kid = store
        .insert(&expired.export_private()?, now - SEED_KEY_LIFETIME_SECS)
        .await?;

    info!(valid_kid, expired_kid, now, "Seeded signing keys");

    Ok(SeedReport {
        valid_kid,
        expired_kid,
    })
}
