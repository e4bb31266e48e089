//! RS256 token issuance.

pub mod claims;
pub mod issuer;
pub mod serializer;

pub use claims::Claims;
pub use issuer::{DEFAULT_SUBJECT, IssuedToken, TOKEN_TTL_SECS, TokenIssuer};
pub use serializer::JwtSerializer;
