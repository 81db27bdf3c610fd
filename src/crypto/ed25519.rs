use crate::{
    crypto::address::{PublicKey, ED25519_KEY_PREFIX},
    error::{AuthError, Result},
};
use ed25519_dalek::{Signature, VerifyingKey};

/// Verify an ed25519 signature over `message`
///
/// Uses strict verification, which rejects small-order keys and
/// non-canonical `S` values.
pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8]) -> Result<PublicKey> {
    let verifying_key = VerifyingKey::from_bytes(public_key)
        .map_err(|e| AuthError::InvalidSignature(format!("Invalid ed25519 key: {}", e)))?;
    let signature = Signature::from_slice(signature)
        .map_err(|e| AuthError::InvalidSignature(format!("Invalid ed25519 signature: {}", e)))?;

    verifying_key
        .verify_strict(message, &signature)
        .map_err(|e| AuthError::InvalidSignature(format!("Failed to verify: {}", e)))?;

    Ok(PublicKey::Ed25519(*public_key))
}

/// Split an XRPL-encoded ed25519 key (`0xED ‖ 32 bytes`) into its raw bytes
pub fn xrpl_key(encoded: &[u8]) -> Option<[u8; 32]> {
    match encoded.split_first() {
        Some((&ED25519_KEY_PREFIX, key)) => key.try_into().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    #[test]
    fn test_verify_valid() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let signature = key.sign(b"MSG\0login-7f3a");
        let public = key.verifying_key().to_bytes();

        let result = verify(&public, b"MSG\0login-7f3a", &signature.to_bytes());
        assert_eq!(result, Ok(PublicKey::Ed25519(public)));
    }

    #[test]
    fn test_verify_tampered_message() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let signature = key.sign(b"MSG\0login-7f3a");
        let public = key.verifying_key().to_bytes();

        let result = verify(&public, b"MSG\0login-7f3b", &signature.to_bytes());
        assert!(matches!(result, Err(AuthError::InvalidSignature(_))));
    }

    #[test]
    fn test_verify_zero_signature() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let public = key.verifying_key().to_bytes();

        let result = verify(&public, b"message", &[0u8; 64]);
        assert!(result.is_err());
    }

    #[test]
    fn test_xrpl_key() {
        let mut encoded = vec![0xED];
        encoded.extend_from_slice(&[9u8; 32]);
        assert_eq!(xrpl_key(&encoded), Some([9u8; 32]));

        encoded[0] = 0x02;
        assert_eq!(xrpl_key(&encoded), None);
        assert_eq!(xrpl_key(&[0xED, 1, 2]), None);
    }
}
