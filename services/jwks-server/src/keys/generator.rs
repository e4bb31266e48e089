//! RSA keypair generation.

use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use std::sync::Arc;

use super::KeyMaterial;

/// RSA modulus size for generated signing keys.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Errors from key generation.
#[derive(Debug, thiserror::Error)]
pub enum KeyGenError {
    /// The RSA primitive failed
    #[error("RSA key generation failed: {0}")]
    Rsa(String),

    /// The blocking generation task panicked or was cancelled
    #[error("Key generation task failed: {0}")]
    Task(String),
}

/// Source of fresh signing keypairs.
pub trait KeyGenerator: Send + Sync {
    /// Produce a new keypair. Blocking and CPU-bound.
    ///
    /// # Errors
    ///
    /// Returns [`KeyGenError`] if the primitive is unavailable.
    fn generate(&self) -> Result<KeyMaterial, KeyGenError>;
}

/// Generates RSA keys from the OS random source.
#[derive(Debug, Clone, Copy)]
pub struct RsaKeyGenerator {
    bits: usize,
}

impl RsaKeyGenerator {
    /// Generator for 2048-bit keys.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bits: DEFAULT_KEY_BITS,
        }
    }
}

impl Default for RsaKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for RsaKeyGenerator {
    fn generate(&self) -> Result<KeyMaterial, KeyGenError> {
        let private_key =
            RsaPrivateKey::new(&mut OsRng, self.bits).map_err(|e| KeyGenError::Rsa(e.to_string()))?;
        Ok(KeyMaterial::from_private_key(private_key))
    }
}

/// Run `generator` on the blocking pool.
///
/// # Errors
///
/// Returns the generator's error, or [`KeyGenError::Task`] if the task died.
pub async fn generate_off_runtime(
    generator: Arc<dyn KeyGenerator>,
) -> Result<KeyMaterial, KeyGenError> {
    tokio::task::spawn_blocking(move || generator.generate())
        .await
        .map_err(|e| KeyGenError::Task(e.to_string()))?
}
