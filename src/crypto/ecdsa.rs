use crate::{
    crypto::address::{account_id, AccountId, PublicKey},
    error::{AuthError, Result},
};
use k256::ecdsa::{signature::hazmat::PrehashVerifier, RecoveryId, Signature, VerifyingKey};

/// Parse a DER-encoded secp256k1 signature in canonical low-S form
///
/// Zero or out-of-range scalars fail DER parsing. A high-S signature is
/// rejected rather than normalized, matching what XRPL wallets accept.
pub fn parse_der_signature(signature_der: &[u8]) -> Result<Signature> {
    let signature = Signature::from_der(signature_der)
        .map_err(|e| AuthError::InvalidSignature(format!("Failed to parse signature: {}", e)))?;

    if signature.normalize_s().is_some() {
        return Err(AuthError::NonCanonicalSignature);
    }
    Ok(signature)
}

/// Verify a DER-encoded ECDSA signature over a 32-byte digest
///
/// # Arguments
/// * `public_key` - SEC1-encoded secp256k1 public key (compressed or not)
/// * `digest` - The 32-byte digest that was signed
/// * `signature_der` - DER-encoded signature bytes
///
/// # Returns
/// * `Ok(PublicKey)` with the compressed signing key if the signature is valid
/// * `Err(AuthError)` if parsing or verification fails
///
/// # Example
/// ```rust
/// use xrpl_signature_auth::crypto::ecdsa::verify_prehash;
///
/// let public_key = [0x02; 33];
/// let digest = [0u8; 32];
/// let signature = [0x30, 0x44, 0x02, 0x20];
///
/// assert!(verify_prehash(&public_key, &digest, &signature).is_err());
/// ```
pub fn verify_prehash(
    public_key: &[u8],
    digest: &[u8; 32],
    signature_der: &[u8],
) -> Result<PublicKey> {
    let signature = parse_der_signature(signature_der)?;

    let verifying_key = VerifyingKey::from_sec1_bytes(public_key).map_err(|e| {
        AuthError::InvalidSignature(format!("Failed to derive verifying key: {}", e))
    })?;

    verifying_key
        .verify_prehash(digest, &signature)
        .map_err(|e| AuthError::InvalidSignature(format!("Failed to verify: {}", e)))?;

    compressed(&verifying_key)
}

/// Recover the key that signed `digest` and belongs to `account`
///
/// A DER signature carries no recovery id, so every candidate id is tried
/// and the recovered key is accepted only if it hashes to `account`. The
/// winning key is then checked with an ordinary verification.
pub fn recover_for_account(
    digest: &[u8; 32],
    signature_der: &[u8],
    account: &AccountId,
) -> Result<PublicKey> {
    let signature = parse_der_signature(signature_der)?;

    for id in 0..=3u8 {
        let Some(recovery_id) = RecoveryId::from_byte(id) else {
            continue;
        };
        let Ok(candidate) = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        else {
            continue;
        };

        let public_key = compressed(&candidate)?;
        if account_id(&public_key) != *account {
            continue;
        }

        candidate
            .verify_prehash(digest, &signature)
            .map_err(|e| AuthError::InvalidSignature(format!("Failed to verify: {}", e)))?;
        return Ok(public_key);
    }

    Err(AuthError::AddressMismatch)
}

fn compressed(verifying_key: &VerifyingKey) -> Result<PublicKey> {
    let point = verifying_key.to_encoded_point(true);
    let bytes: [u8; 33] = point.as_bytes().try_into().map_err(|_| {
        AuthError::InvalidSignature("unexpected compressed key length".to_string())
    })?;
    Ok(PublicKey::Secp256k1(bytes))
}
