//! Property-based tests for the JWKS discovery document.

mod common;

use common::{KEYS, pem};
use jwks_server::jwks::DiscoveryPublisher;
use jwks_server::{KeyStore, MemoryStore};
use proptest::prelude::*;

/// Up to three keys, each with an expiry near zero.
fn arb_keys() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0usize..3, -100i64..100), 0..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Published kids are exactly the ids of records with `expires_at > now`.
    #[test]
    fn prop_publishes_only_valid_keys(
        keys in arb_keys(),
        now in -50i64..50,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = MemoryStore::new();
            let mut expected = Vec::new();
            for (index, expires_at) in &keys {
                let id = store.insert(&pem(*index), *expires_at).await.unwrap();
                if *expires_at > now {
                    expected.push((id, *index));
                }
            }

            let jwks = DiscoveryPublisher::new().publish(&store, now).await.unwrap();

            prop_assert_eq!(jwks.keys.len(), expected.len());
            for (id, index) in &expected {
                let jwk = jwks.find_key(&id.to_string());
                prop_assert!(jwk.is_some(), "Valid key {} must be published", id);
                prop_assert_eq!(jwk.unwrap(), &KEYS[*index].to_public_jwk(*id));
            }
            Ok(())
        })?;
    }

    /// The document always serializes to `{"keys": [...]}` with RSA fields.
    #[test]
    fn prop_jwks_json_shape(
        keys in arb_keys(),
        now in -50i64..50,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = MemoryStore::new();
            for (index, expires_at) in &keys {
                store.insert(&pem(*index), *expires_at).await.unwrap();
            }

            let jwks = DiscoveryPublisher::new().publish(&store, now).await.unwrap();
            let value: serde_json::Value = serde_json::to_value(&jwks).unwrap();

            prop_assert!(value["keys"].is_array(), "'keys' must be array");
            for key in value["keys"].as_array().unwrap() {
                prop_assert_eq!(&key["kty"], "RSA");
                prop_assert_eq!(&key["use"], "sig");
                prop_assert_eq!(&key["alg"], "RS256");
                prop_assert!(key["kid"].is_string());
                prop_assert!(key["n"].is_string());
                prop_assert_eq!(&key["e"], "AQAB");
            }
            Ok(())
        })?;
    }
}
