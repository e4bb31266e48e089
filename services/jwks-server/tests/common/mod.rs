//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use jwks_server::keys::{KeyGenerator, KeyMaterial, RsaKeyGenerator};
use jwks_server::{AppState, Clock, FixedClock, KeyRecord, KeyStore, StorageError, create_router};
use std::sync::{Arc, LazyLock};
use tower::ServiceExt;

/// RSA keys generated once per test binary.
pub static KEYS: LazyLock<Vec<KeyMaterial>> = LazyLock::new(|| {
    (0..3)
        .map(|_| RsaKeyGenerator::new().generate().unwrap())
        .collect()
});

/// Stored (PEM) form of fixture key `index`.
pub fn pem(index: usize) -> Vec<u8> {
    KEYS[index].export_private().unwrap().to_vec()
}

/// A store whose every call fails like a broken disk.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl KeyStore for FailingStore {
    async fn insert(&self, _material: &[u8], _expires_at: i64) -> Result<i64, StorageError> {
        Err(StorageError::Database("disk I/O error".into()))
    }

    async fn all_valid_at(&self, _now: i64) -> Result<Vec<KeyRecord>, StorageError> {
        Err(StorageError::Database("disk I/O error".into()))
    }
}

/// Router over `store` with time frozen at `now`.
pub fn app(store: Arc<dyn KeyStore>, now: i64) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now));
    create_router(Arc::new(AppState::new(store, clock)))
}

/// Drive one request through the router.
pub async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, headers, body)
}
