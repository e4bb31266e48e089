//! Signing key lifecycle: generation, encoding, seeding and selection.

pub mod generator;
pub mod material;
pub mod seed;
pub mod selector;

pub use generator::{DEFAULT_KEY_BITS, KeyGenError, KeyGenerator, RsaKeyGenerator};
pub use material::{CodecError, KeyMaterial, SIGNING_ALGORITHM};
pub use seed::{SEED_KEY_LIFETIME_SECS, SeedReport, seed_keys};
pub use selector::select_signing_key;
