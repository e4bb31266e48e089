//! Compact JWS encoding.

use crate::error::ServiceError;
use crate::jwt::claims::Claims;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// RS256 compact JWS encoding with a `kid` header.
#[derive(Debug, Clone, Copy)]
pub struct JwtSerializer {
    algorithm: Algorithm,
}

impl JwtSerializer {
    /// RS256 serializer.
    #[must_use]
    pub const fn new() -> Self {
        JwtSerializer {
            algorithm: Algorithm::RS256,
        }
    }

    /// Sign `claims`. Header is `{"typ": "JWT", "alg": "RS256", "kid": key_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Signing`] if the key cannot produce an RS256
    /// signature.
    pub fn serialize(&self, claims: &Claims, key: &EncodingKey, key_id: &str) -> Result<String, ServiceError> {
        let mut header = Header::new(self.algorithm);
        header.kid = Some(key_id.to_string());

        Ok(encode(&header, claims, key)?)
    }

    /// Verify signature and expiry. Used by verifiers and tests; the service
    /// itself never re-validates tokens it issued.
    ///
    /// # Errors
    ///
    /// Returns the `jsonwebtoken` error for a bad signature, an expired
    /// token or malformed input.
    pub fn deserialize(&self, token: &str, key: &DecodingKey) -> jsonwebtoken::errors::Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;

        decode::<Claims>(token, key, &validation).map(|data| data.claims)
    }
}

impl Default for JwtSerializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::decode_header;

    #[test]
    fn test_rejects_wrong_key_type() {
        let serializer = JwtSerializer::new();
        let claims = Claims::new("sampleUser", 0, 3600);

        // An HMAC secret cannot produce an RS256 signature
        let result = serializer.serialize(&claims, &EncodingKey::from_secret(b"secret"), "1");
        assert!(matches!(result, Err(ServiceError::Signing(_))));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let serializer = JwtSerializer::new();
        let key = DecodingKey::from_rsa_components("AQAB", "AQAB").unwrap();

        assert!(serializer.deserialize("not.a.token", &key).is_err());
        assert!(decode_header("garbage").is_err());
    }
}
