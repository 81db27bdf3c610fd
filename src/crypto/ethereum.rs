use crate::{
    crypto::address::PublicKey,
    error::{AuthError, Result},
};

/// Length of an `r ‖ s ‖ v` recoverable signature
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Recover the secp256k1 key behind a `personal_sign` style signature
///
/// # Arguments
/// * `digest` - Keccak-256 personal-message digest
/// * `signature` - 65 bytes `r ‖ s ‖ v`; `v` may be a raw recovery id
///   (0..=3) or the Ethereum form (27..=30)
///
/// # Returns
/// * `Ok(PublicKey)` - compressed recovered key
/// * `Err(AuthError::InvalidLength)` - signature is not 65 bytes
/// * `Err(AuthError)` - zero or out-of-range scalars, bad recovery id, or
///   a recovery failure
pub fn recover_public_key(digest: &[u8; 32], signature: &[u8]) -> Result<PublicKey> {
    let bytes: &[u8; RECOVERABLE_SIGNATURE_LEN] =
        signature.try_into().map_err(|_| AuthError::InvalidLength {
            expected: format!("{RECOVERABLE_SIGNATURE_LEN} bytes (r ‖ s ‖ v)"),
            actual: signature.len(),
        })?;

    let (r, rest) = bytes.split_at(32);
    let (s, v) = rest.split_at(32);
    if r.iter().all(|b| *b == 0) || s.iter().all(|b| *b == 0) {
        return Err(AuthError::InvalidSignature(
            "signature scalar is zero".to_string(),
        ));
    }

    let mut compact = [0u8; 64];
    compact.copy_from_slice(&bytes[..64]);
    let parsed = libsecp256k1::Signature::parse_standard(&compact).map_err(|e| {
        AuthError::InvalidSignature(format!("signature scalar out of range: {:?}", e))
    })?;

    let recovery_byte = match v[0] {
        id @ 27..=30 => id - 27,
        id => id,
    };
    let recovery_id = libsecp256k1::RecoveryId::parse(recovery_byte)
        .map_err(|_| AuthError::RecoveryFailed(format!("invalid recovery id {}", v[0])))?;

    let message = libsecp256k1::Message::parse(digest);
    let public_key = libsecp256k1::recover(&message, &parsed, &recovery_id)
        .map_err(|e| AuthError::RecoveryFailed(format!("{:?}", e)))?;

    Ok(PublicKey::Secp256k1(public_key.serialize_compressed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::personal_message_payload;
    use k256::ecdsa::SigningKey;

    fn sign(key: &SigningKey, digest: &[u8; 32], v_offset: u8) -> Vec<u8> {
        let (signature, recovery_id) = key.sign_prehash_recoverable(digest).unwrap();
        let mut out = signature.to_bytes().to_vec();
        out.push(recovery_id.to_byte() + v_offset);
        out
    }

    fn expected_key(key: &SigningKey) -> PublicKey {
        let point = key.verifying_key().to_encoded_point(true);
        PublicKey::Secp256k1(point.as_bytes().try_into().unwrap())
    }

    #[test]
    fn test_recover_ethereum_v() {
        let key = SigningKey::from_bytes(&[0x11u8; 32].into()).unwrap();
        let digest = personal_message_payload(b"login-7f3a").digest;
        let signature = sign(&key, &digest, 27);

        assert_eq!(recover_public_key(&digest, &signature), Ok(expected_key(&key)));
    }

    #[test]
    fn test_recover_raw_v() {
        let key = SigningKey::from_bytes(&[0x11u8; 32].into()).unwrap();
        let digest = personal_message_payload(b"login-7f3a").digest;
        let signature = sign(&key, &digest, 0);

        assert_eq!(recover_public_key(&digest, &signature), Ok(expected_key(&key)));
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        let result = recover_public_key(&[1u8; 32], &[1u8; 64]);
        assert!(matches!(result, Err(AuthError::InvalidLength { actual: 64, .. })));
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_zero_scalars_rejected() {
        let mut signature = [0u8; 65];
        signature[40] = 1;
        signature[64] = 27;
        let result = recover_public_key(&[1u8; 32], &signature);
        assert!(matches!(result, Err(AuthError::InvalidSignature(_))));
    }

    #[test]
    fn test_out_of_range_scalars_rejected() {
        let mut signature = [0xFFu8; 65];
        signature[64] = 27;
        let result = recover_public_key(&[1u8; 32], &signature);
        assert!(matches!(result, Err(AuthError::InvalidSignature(_))));
    }

    #[test]
    fn test_invalid_recovery_id() {
        let key = SigningKey::from_bytes(&[0x11u8; 32].into()).unwrap();
        let digest = personal_message_payload(b"login-7f3a").digest;
        let mut signature = sign(&key, &digest, 27);
        signature[64] = 35;

        let result = recover_public_key(&digest, &signature);
        assert!(matches!(result, Err(AuthError::RecoveryFailed(_))));
    }

    #[test]
    fn test_flipped_recovery_id_changes_key() {
        let key = SigningKey::from_bytes(&[0x11u8; 32].into()).unwrap();
        let digest = personal_message_payload(b"login-7f3a").digest;
        let mut signature = sign(&key, &digest, 27);
        signature[64] ^= 1;

        match recover_public_key(&digest, &signature) {
            Ok(recovered) => assert_ne!(recovered, expected_key(&key)),
            Err(e) => assert!(!e.is_malformed()),
        }
    }
}
