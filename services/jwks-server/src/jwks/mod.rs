//! JWKS discovery document.

pub mod publisher;

pub use publisher::{DiscoveryPublisher, Jwk, Jwks};
