//! JWKS parsing into verification keys.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use serde::Deserialize;
use tracing::{debug, warn};
use windams_domain::{
    CredentialError, CredentialResult, KeyType, RsaKeyMaterial, SigningKey, SigningKeySet,
};

/// Outer JWKS document. Azure AD has been seen publishing `Keys`.
#[derive(Debug, Deserialize)]
struct JwkSet {
    #[serde(alias = "Keys")]
    keys: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kty: String,
    #[serde(default)]
    kid: Option<String>,
    #[serde(default)]
    alg: Option<String>,
    #[serde(default, rename = "use")]
    key_use: Option<String>,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
    #[serde(default)]
    x5c: Vec<String>,
}

/// Turns a provider's key-discovery document into RSA verification keys.
///
/// Resolution is best-effort: keys of other types, keys without a `kid` and
/// keys whose material does not decode are skipped. Only a malformed outer
/// document is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SigningKeyResolver;

impl SigningKeyResolver {
    /// Parse a raw JWKS document.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Protocol` if the document is not a JSON
    /// object with a `keys` array.
    pub fn resolve(raw: &[u8]) -> CredentialResult<SigningKeySet> {
        let set: JwkSet = serde_json::from_slice(raw)
            .map_err(|e| CredentialError::protocol(format!("malformed key set: {e}")))?;

        let mut keys = SigningKeySet::new();
        for value in set.keys {
            let jwk: Jwk = match serde_json::from_value(value) {
                Ok(jwk) => jwk,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable key entry");
                    continue;
                }
            };

            if KeyType::from_kty(&jwk.kty) != KeyType::Rsa {
                debug!(kid = ?jwk.kid, kty = %jwk.kty, "skipping non-RSA key");
                continue;
            }

            let Some(kid) = jwk.kid.clone() else {
                warn!("skipping RSA key without kid");
                continue;
            };

            match decode_material(jwk) {
                Ok(material) => {
                    keys.insert(kid.clone(), SigningKey::rsa(kid, material));
                }
                Err(reason) => warn!(kid = %kid, reason, "skipping RSA key with bad material"),
            }
        }

        Ok(keys)
    }
}

fn decode_material(jwk: Jwk) -> Result<RsaKeyMaterial, &'static str> {
    let modulus = jwk.n.as_deref().ok_or("missing modulus")?;
    let exponent = jwk.e.as_deref().ok_or("missing exponent")?;

    let modulus = decode_base64url(modulus).ok_or("modulus is not base64url")?;
    let exponent = decode_base64url(exponent).ok_or("exponent is not base64url")?;
    if modulus.is_empty() || exponent.is_empty() {
        return Err("empty key component");
    }

    let certificate_chain = jwk
        .x5c
        .iter()
        .map(|cert| STANDARD.decode(cert))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| "x5c entry is not base64")?;

    Ok(RsaKeyMaterial {
        modulus,
        exponent,
        certificate_chain,
        algorithm: jwk.alg,
        key_use: jwk.key_use,
    })
}

fn decode_base64url(value: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(value.trim_end_matches('=')).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keeps_only_rsa_keys() {
        let doc = br#"{"keys": [
            {"kty": "RSA", "kid": "k1", "use": "sig", "alg": "RS256", "n": "AQAB", "e": "AQAB", "x5c": ["MIIC"]},
            {"kty": "EC", "kid": "k2", "crv": "P-256", "x": "AQAB", "y": "AQAB"}
        ]}"#;

        let keys = SigningKeyResolver::resolve(doc).unwrap();
        assert_eq!(keys.len(), 1);

        let key = &keys["k1"];
        assert_eq!(key.key_id, "k1");
        assert_eq!(key.key_type, KeyType::Rsa);
        assert_eq!(key.material.modulus, vec![0x01, 0x00, 0x01]);
        assert_eq!(key.material.exponent, vec![0x01, 0x00, 0x01]);
        assert_eq!(key.leaf_certificate(), Some(&[0x30, 0x82, 0x02][..]));
        assert_eq!(key.material.algorithm.as_deref(), Some("RS256"));
        assert_eq!(key.material.key_use.as_deref(), Some("sig"));
    }

    #[test]
    fn test_accepts_capitalized_keys_field() {
        let doc = br#"{"Keys": [{"kty": "RSA", "kid": "k1", "n": "AQAB", "e": "AQAB"}]}"#;
        let keys = SigningKeyResolver::resolve(doc).unwrap();
        assert!(keys.contains_key("k1"));
        assert!(keys["k1"].material.certificate_chain.is_empty());
    }

    #[test]
    fn test_skips_unusable_rsa_keys() {
        let doc = br#"{"keys": [
            {"kty": "RSA", "n": "AQAB", "e": "AQAB"},
            {"kty": "RSA", "kid": "no-modulus", "e": "AQAB"},
            {"kty": "RSA", "kid": "bad-modulus", "n": "!!!", "e": "AQAB"},
            {"kty": "RSA", "kid": "bad-cert", "n": "AQAB", "e": "AQAB", "x5c": ["%%%"]},
            {"kty": 7, "kid": "weird"},
            {"kty": "RSA", "kid": "good", "n": "AQAB", "e": "AQAB"}
        ]}"#;

        let keys = SigningKeyResolver::resolve(doc).unwrap();
        assert_eq!(keys.keys().collect::<Vec<_>>(), vec!["good"]);
    }

    #[test]
    fn test_tolerates_padded_components() {
        let doc = br#"{"keys": [{"kty": "RSA", "kid": "k1", "n": "AQAB==", "e": "AQAB"}]}"#;
        let keys = SigningKeyResolver::resolve(doc).unwrap();
        assert_eq!(keys["k1"].material.modulus, vec![0x01, 0x00, 0x01]);
    }

    #[test]
    fn test_empty_key_set_is_valid() {
        let keys = SigningKeyResolver::resolve(br#"{"keys": []}"#).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_malformed_document_is_protocol_error() {
        let docs: [&[u8]; 4] = [b"not json", br#"{"keys": 3}"#, br#"{"other": []}"#, b"[]"];
        for doc in docs {
            let err = SigningKeyResolver::resolve(doc).unwrap_err();
            assert!(matches!(err, CredentialError::Protocol { .. }), "{err:?}");
        }
    }
}
