//! Public signing keys published by identity providers

use std::collections::HashMap;

/// JWK key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// RSA public key.
    Rsa,
    /// Any other key type (EC, OKP, oct, ...).
    Other,
}

impl KeyType {
    /// Maps a JWK `kty` value. Comparison ignores ASCII case.
    #[must_use]
    pub fn from_kty(kty: &str) -> Self {
        if kty.eq_ignore_ascii_case("RSA") {
            Self::Rsa
        } else {
            Self::Other
        }
    }
}

/// Decoded RSA public key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    /// Modulus, big-endian.
    pub modulus: Vec<u8>,
    /// Public exponent, big-endian.
    pub exponent: Vec<u8>,
    /// DER certificates from `x5c`, leaf first.
    pub certificate_chain: Vec<Vec<u8>>,
    /// Advertised algorithm, e.g. `RS256`.
    pub algorithm: Option<String>,
    /// Advertised use, e.g. `sig`.
    pub key_use: Option<String>,
}

/// A verification key identified by its `kid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    /// The JWK `kid`.
    pub key_id: String,
    /// Always `KeyType::Rsa` for keys produced by resolution.
    pub key_type: KeyType,
    /// Public key material.
    pub material: RsaKeyMaterial,
}

impl SigningKey {
    /// Creates an RSA signing key.
    pub fn rsa(key_id: impl Into<String>, material: RsaKeyMaterial) -> Self {
        Self {
            key_id: key_id.into(),
            key_type: KeyType::Rsa,
            material,
        }
    }

    /// Leaf certificate from the `x5c` chain, if one was published.
    #[must_use]
    pub fn leaf_certificate(&self) -> Option<&[u8]> {
        self.material.certificate_chain.first().map(Vec::as_slice)
    }
}

/// Signing keys by `kid`.
pub type SigningKeySet = HashMap<String, SigningKey>;
