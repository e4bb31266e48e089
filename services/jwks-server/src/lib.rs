//! JWKS server library.
//!
//! Manages a small set of expiring RSA signing keys, issues RS256 JWTs with
//! the currently valid key and publishes the public half of every valid key
//! as a JWKS discovery document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod jwks;
pub mod jwt;
pub mod keys;
pub mod shutdown;
pub mod storage;
pub mod telemetry;

// Re-exports for convenience
pub use api::{AppState, create_router};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::ServiceError;
pub use storage::{KeyRecord, KeyStore, MemoryStore, SqliteStore, StorageError};
