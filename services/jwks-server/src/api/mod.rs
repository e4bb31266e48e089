//! HTTP surface.
//!
//! - `GET /ready` - liveness, always 200 with an empty body
//! - `POST /auth` - issue a token signed by the current key
//! - `GET /.well-known/jwks.json` - public keys valid right now

pub mod error;
pub mod gate;
pub mod handlers;

use axum::{
    Router,
    http::StatusCode,
    routing::{any, get},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use gate::{MethodNotAllowed, Operation, gate};
pub use handlers::{AppState, TokenResponse};

/// Liveness check endpoint
///
/// GET /ready
pub async fn ready() -> StatusCode {
    StatusCode::OK
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .route("/auth", any(handlers::issue_token))
        .route("/.well-known/jwks.json", any(handlers::publish_discovery))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
