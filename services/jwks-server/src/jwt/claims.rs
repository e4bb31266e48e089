//! Token payload.

use serde::{Deserialize, Serialize};

/// Payload of an issued token.
///
/// `exp` is the token's own validity window and has nothing to do with the
/// expiry of the key that signed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject
    pub sub: String,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
}

impl Claims {
    /// Claims issued at `issued_at` and expiring `ttl_seconds` later.
    pub fn new(subject: impl Into<String>, issued_at: i64, ttl_seconds: i64) -> Self {
        Claims {
            sub: subject.into(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
        }
    }
}
