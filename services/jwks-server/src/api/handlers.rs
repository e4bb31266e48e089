//! Request handlers.
//!
//! Both core handlers are mounted for every method; the gate runs first and
//! refuses anything but the designated one.

use axum::{Json, extract::State, http::Method};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use super::gate::{Operation, gate};
use crate::clock::Clock;
use crate::jwks::{DiscoveryPublisher, Jwks};
use crate::jwt::TokenIssuer;
use crate::storage::KeyStore;

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    /// Key store, shared by every request
    pub store: Arc<dyn KeyStore>,
    /// Source of "now"
    pub clock: Arc<dyn Clock>,
    /// Token signer
    pub issuer: TokenIssuer,
    /// JWKS renderer
    pub publisher: DiscoveryPublisher,
}

impl AppState {
    /// State with the default issuer and publisher.
    #[must_use]
    pub fn new(store: Arc<dyn KeyStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            issuer: TokenIssuer::new(),
            publisher: DiscoveryPublisher::new(),
        }
    }
}

/// Body of a successful `POST /auth`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT
    pub token: String,
}

/// Issue a token
///
/// POST /auth
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    method: Method,
) -> Result<Json<TokenResponse>, ApiError> {
    gate(Operation::IssueToken, &method)?;

    let now = state.clock.now();
    let issued = state
        .issuer
        .issue(state.store.as_ref(), now)
        .await
        .map_err(|e| ApiError::core(Operation::IssueToken, now, e))?;

    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

/// Publish the public keys valid right now
///
/// GET /.well-known/jwks.json
pub async fn publish_discovery(
    State(state): State<Arc<AppState>>,
    method: Method,
) -> Result<Json<Jwks>, ApiError> {
    gate(Operation::PublishDiscovery, &method)?;

    let now = state.clock.now();
    let jwks = state
        .publisher
        .publish(state.store.as_ref(), now)
        .await
        .map_err(|e| ApiError::core(Operation::PublishDiscovery, now, e))?;

    Ok(Json(jwks))
}
