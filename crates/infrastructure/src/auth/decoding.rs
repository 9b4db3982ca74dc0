//! Conversion of resolved signing keys into JWT verification keys.

use jsonwebtoken::DecodingKey;
use windams_domain::{CredentialError, CredentialResult, KeyType, SigningKey};

/// Build a `jsonwebtoken` verification key from an RSA signing key.
///
/// # Errors
///
/// Returns `CredentialError::Protocol` for non-RSA keys.
pub fn decoding_key(key: &SigningKey) -> CredentialResult<DecodingKey> {
    if key.key_type != KeyType::Rsa {
        return Err(CredentialError::protocol(format!(
            "key {} is not an RSA key",
            key.key_id
        )));
    }
    Ok(DecodingKey::from_rsa_raw_components(
        &key.material.modulus,
        &key.material.exponent,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use windams_domain::RsaKeyMaterial;

    fn material() -> RsaKeyMaterial {
        RsaKeyMaterial {
            modulus: vec![0xC3; 256],
            exponent: vec![0x01, 0x00, 0x01],
            certificate_chain: Vec::new(),
            algorithm: Some("RS256".to_string()),
            key_use: Some("sig".to_string()),
        }
    }

    #[test]
    fn test_rsa_key_converts() {
        let key = SigningKey::rsa("k1", material());
        assert!(decoding_key(&key).is_ok());
    }

    #[test]
    fn test_non_rsa_key_is_rejected() {
        let mut key = SigningKey::rsa("k2", material());
        key.key_type = KeyType::Other;
        let err = decoding_key(&key).err().unwrap();
        assert!(matches!(err, CredentialError::Protocol { .. }));
    }
}
