//! RSA key material codec.
//!
//! Private keys are stored as PKCS#8 PEM. Imports also accept PKCS#1
//! (`RSA PRIVATE KEY`) PEM, the format older deployments wrote.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::EncodingKey;
use rsa::RsaPrivateKey;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use std::fmt;
use zeroize::Zeroizing;

use crate::jwks::Jwk;

/// JOSE algorithm used for every key and token.
pub const SIGNING_ALGORITHM: &str = "RS256";

/// Errors converting key material.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Stored bytes are not a usable RSA private key
    #[error("Invalid private key PEM: {0}")]
    Pem(String),

    /// Key could not be encoded
    #[error("Key encoding failed: {0}")]
    Der(String),
}

/// An RSA keypair able to sign tokens and describe its public half.
#[derive(Clone)]
pub struct KeyMaterial {
    private_key: RsaPrivateKey,
}

impl KeyMaterial {
    /// Wrap an existing private key.
    #[must_use]
    pub const fn from_private_key(private_key: RsaPrivateKey) -> Self {
        Self { private_key }
    }

    /// Serialize the full keypair for storage.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Der`] if PKCS#8 encoding fails.
    pub fn export_private(&self) -> Result<Zeroizing<Vec<u8>>, CodecError> {
        let pem = self
            .private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CodecError::Der(e.to_string()))?;
        Ok(Zeroizing::new(pem.as_bytes().to_vec()))
    }

    /// Rebuild a signing key from stored bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Pem`] if the bytes are not a valid RSA private
    /// key in PKCS#8 or PKCS#1 PEM form.
    pub fn import_private(bytes: &[u8]) -> Result<Self, CodecError> {
        let pem = std::str::from_utf8(bytes).map_err(|e| CodecError::Pem(e.to_string()))?;

        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| CodecError::Pem(e.to_string()))?;

        private_key
            .validate()
            .map_err(|e| CodecError::Pem(e.to_string()))?;

        Ok(Self { private_key })
    }

    /// Public components tagged with `kid`, ready for a JWKS document.
    #[must_use]
    pub fn to_public_jwk(&self, kid: i64) -> Jwk {
        Jwk {
            kty: "RSA".to_string(),
            kid: kid.to_string(),
            key_use: "sig".to_string(),
            alg: SIGNING_ALGORITHM.to_string(),
            n: URL_SAFE_NO_PAD.encode(self.private_key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(self.private_key.e().to_bytes_be()),
        }
    }

    /// Signing key for `jsonwebtoken`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Der`] if PKCS#1 DER encoding fails.
    pub fn encoding_key(&self) -> Result<EncodingKey, CodecError> {
        let der = self
            .private_key
            .to_pkcs1_der()
            .map_err(|e| CodecError::Der(e.to_string()))?;
        Ok(EncodingKey::from_rsa_der(der.as_bytes()))
    }

    /// Modulus size in bits.
    #[must_use]
    pub fn bits(&self) -> usize {
        self.private_key.size() * 8
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}
