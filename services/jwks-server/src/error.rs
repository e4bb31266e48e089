//! Service-level error taxonomy.
//!
//! Component errors (`StorageError`, `CodecError`, `KeyGenError`) live next to
//! the code that raises them and convert into [`ServiceError`] with `?`.

use crate::keys::{CodecError, KeyGenError};
use crate::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the core operations and startup.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Key store I/O failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// No key satisfies `expires_at > now`
    #[error("No valid signing key available")]
    NoValidKey,

    /// Stored key material does not decode
    #[error("Key material error: {0}")]
    Codec(#[from] CodecError),

    /// Key generation failed
    #[error("Key generation error: {0}")]
    KeyGen(#[from] KeyGenError),

    /// JWT encoding or signing failed
    #[error("JWT signing error: {0}")]
    Signing(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<jsonwebtoken::errors::Error> for ServiceError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Signing(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ServiceError::NoValidKey.to_string(),
            "No valid signing key available"
        );
        let err: ServiceError = StorageError::Database("disk I/O error".into()).into();
        assert_eq!(err.to_string(), "Storage error: Database error: disk I/O error");
    }
}
