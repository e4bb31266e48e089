//! JWKS rendering.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ServiceError;
use crate::keys::KeyMaterial;
use crate::storage::KeyStore;

/// Public RSA key in JWK form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, always `RSA`
    pub kty: String,
    /// Store id as a decimal string
    pub kid: String,
    /// Intended use, always `sig`
    #[serde(rename = "use")]
    pub key_use: String,
    /// Signing algorithm, always `RS256`
    pub alg: String,
    /// Modulus, base64url without padding
    pub n: String,
    /// Public exponent, base64url without padding
    pub e: String,
}

/// Discovery document: `{"keys": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    /// Published keys
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// Empty key set.
    #[must_use]
    pub fn new() -> Self {
        Jwks { keys: Vec::new() }
    }

    /// Append a key.
    pub fn add_key(&mut self, key: Jwk) {
        self.keys.push(key);
    }

    /// Look up a key by `kid`.
    #[must_use]
    pub fn find_key(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }
}

/// Renders the public half of every key valid at a given instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveryPublisher;

impl DiscoveryPublisher {
    /// Stateless publisher.
    #[must_use]
    pub const fn new() -> Self {
        DiscoveryPublisher
    }

    /// Build the JWKS document for `now`.
    ///
    /// Expired records are filtered by the store and never decoded. Keys are
    /// listed in ascending id order.
    ///
    /// # Errors
    ///
    /// Fails if the store fails or any valid key does not decode.
    pub async fn publish(&self, store: &dyn KeyStore, now: i64) -> Result<Jwks, ServiceError> {
        let mut records = store.all_valid_at(now).await?;
        records.sort_unstable_by_key(|record| record.id);

        let mut jwks = Jwks::new();
        for record in &records {
            let material = KeyMaterial::import_private(&record.material)?;
            jwks.add_key(material.to_public_jwk(record.id));
        }

        debug!(count = jwks.keys.len(), now, "Published JWKS");
        Ok(jwks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn test_key(kid: &str) -> Jwk {
        Jwk {
            kty: "RSA".to_string(),
            kid: kid.to_string(),
            key_use: "sig".to_string(),
            alg: "RS256".to_string(),
            n: "test-n".to_string(),
            e: "AQAB".to_string(),
        }
    }

    #[test]
    fn test_jwks_lookup() {
        let mut jwks = Jwks::new();
        jwks.add_key(test_key("1"));
        jwks.add_key(test_key("2"));

        assert_eq!(jwks.find_key("2").unwrap().kid, "2");
        assert!(jwks.find_key("3").is_none());
    }

    #[test]
    fn test_jwk_wire_format() {
        let value = serde_json::to_value(Jwks { keys: vec![test_key("7")] }).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "keys": [{
                    "kty": "RSA",
                    "kid": "7",
                    "use": "sig",
                    "alg": "RS256",
                    "n": "test-n",
                    "e": "AQAB"
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_empty_store_publishes_empty_set() {
        let store = MemoryStore::new();
        let jwks = DiscoveryPublisher::new().publish(&store, 0).await.unwrap();
        assert!(jwks.keys.is_empty());
    }

    #[tokio::test]
    async fn test_expired_material_is_never_decoded() {
        let store = MemoryStore::new();
        // Would fail to decode if it were touched
        store.insert(b"not a key", 50).await.unwrap();

        let jwks = DiscoveryPublisher::new().publish(&store, 100).await.unwrap();
        assert!(jwks.keys.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_valid_key_fails() {
        let store = MemoryStore::new();
        store.insert(b"not a key", 500).await.unwrap();

        let err = DiscoveryPublisher::new().publish(&store, 100).await.unwrap_err();
        assert!(matches!(err, ServiceError::Codec(_)));
    }
}
