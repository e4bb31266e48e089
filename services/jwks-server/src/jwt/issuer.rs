//! Token issuance.

use tracing::info;

use crate::error::ServiceError;
use crate::jwt::claims::Claims;
use crate::jwt::serializer::JwtSerializer;
use crate::keys::{KeyMaterial, select_signing_key};
use crate::storage::KeyStore;

/// Validity window of every issued token.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Subject embedded in every issued token.
pub const DEFAULT_SUBJECT: &str = "sampleUser";

/// A signed token and the key that signed it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS
    pub token: String,
    /// Id of the signing key, also present as the header `kid`
    pub kid: i64,
    /// Signed payload
    pub claims: Claims,
}

/// Signs tokens with the currently valid key.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    subject: String,
    ttl_seconds: i64,
    serializer: JwtSerializer,
}

impl TokenIssuer {
    /// Issuer with the fixed subject and one-hour tokens.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            ttl_seconds: TOKEN_TTL_SECS,
            serializer: JwtSerializer::new(),
        }
    }

    /// Issue a token at `now`.
    ///
    /// The signing key must be valid at `now`; the token is never signed
    /// with an expired key.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NoValidKey`] if no key has `expires_at > now`
    /// - [`ServiceError::Codec`] if the chosen key does not decode
    /// - [`ServiceError::Storage`] if the store fails
    /// - [`ServiceError::Signing`] if JWT encoding fails
    pub async fn issue(&self, store: &dyn KeyStore, now: i64) -> Result<IssuedToken, ServiceError> {
        let record = select_signing_key(store, now)
            .await?
            .ok_or(ServiceError::NoValidKey)?;

        let material = KeyMaterial::import_private(&record.material)?;
        let claims = Claims::new(self.subject.clone(), now, self.ttl_seconds);
        let token = self.serializer.serialize(
            &claims,
            &material.encoding_key()?,
            &record.id.to_string(),
        )?;

        info!(kid = record.id, iat = claims.iat, exp = claims.exp, "Issued token");

        Ok(IssuedToken {
            token,
            kid: record.id,
            claims,
        })
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}
