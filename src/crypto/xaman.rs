//! Xaman signature shapes.
//!
//! Xaman accounts may hold secp256k1 or ed25519 keys, and the wallet can hand
//! back either a bare challenge signature or a full signed SignIn transaction.
//! The shape is detected from the decoded bytes.

use crate::{
    crypto::{
        address::{account_id, PublicKey, ED25519_KEY_PREFIX},
        ecdsa, ed25519,
        transaction::SignedTransaction,
    },
    error::{AuthError, Result},
    wallet::SchemeInput,
};

/// Shortest DER-encoded ECDSA signature
pub const MIN_SIGNATURE_LEN: usize = 8;

/// Bare ed25519 signature
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// `0xED ‖ 32-byte key ‖ 64-byte signature`
pub const ED25519_WITH_KEY_LEN: usize = 1 + 32 + ED25519_SIGNATURE_LEN;

const DER_SEQUENCE_TAG: u8 = 0x30;

/// Decoded Xaman signature, classified by shape
#[derive(Debug, PartialEq, Eq)]
pub enum XamanSignature<'a> {
    /// DER secp256k1 signature over the challenge digest
    Der(&'a [u8]),
    /// ed25519 signature over the challenge message, with its key
    Ed25519 { key: [u8; 32], signature: &'a [u8] },
    /// Signed SignIn transaction blob
    SignedTransaction(&'a [u8]),
}

impl<'a> XamanSignature<'a> {
    pub fn classify(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < MIN_SIGNATURE_LEN {
            return Err(AuthError::InvalidLength {
                expected: format!("at least {MIN_SIGNATURE_LEN} bytes"),
                actual: bytes.len(),
            });
        }

        if bytes[0] == DER_SEQUENCE_TAG {
            return Ok(XamanSignature::Der(bytes));
        }

        if bytes.len() == ED25519_WITH_KEY_LEN && bytes[0] == ED25519_KEY_PREFIX {
            let (encoded_key, signature) = bytes.split_at(33);
            if let Some(key) = ed25519::xrpl_key(encoded_key) {
                return Ok(XamanSignature::Ed25519 { key, signature });
            }
        }

        // No key to recover from and too short for a SignIn transaction
        if bytes.len() == ED25519_SIGNATURE_LEN {
            return Err(AuthError::InvalidSignature(
                "bare ed25519 signature carries no public key, expected 0xED ‖ key ‖ signature"
                    .to_string(),
            ));
        }

        Ok(XamanSignature::SignedTransaction(bytes))
    }
}

pub(crate) fn verify(input: &SchemeInput<'_>) -> Result<PublicKey> {
    match XamanSignature::classify(input.signature)? {
        XamanSignature::Der(der) => {
            tracing::debug!("xaman: DER secp256k1 challenge signature");
            ecdsa::recover_for_account(&input.payload.digest, der, input.claimed)
        }
        XamanSignature::Ed25519 { key, signature } => {
            tracing::debug!("xaman: ed25519 challenge signature");
            ed25519::verify(&key, &input.payload.message, signature)
        }
        XamanSignature::SignedTransaction(blob) => {
            tracing::debug!("xaman: signed SignIn transaction");
            verify_signed_transaction(blob, input.challenge)
        }
    }
}

/// Verify a signed SignIn transaction that carries `challenge` as a memo
///
/// secp256k1 keys sign the SHA-512Half digest of the prefixed unsigned
/// transaction; ed25519 keys sign the prefixed bytes directly.
pub fn verify_signed_transaction(blob: &[u8], challenge: &[u8]) -> Result<PublicKey> {
    let tx = SignedTransaction::parse(blob)?;

    if !tx.carries_challenge(challenge) {
        return Err(AuthError::ChallengeMismatch);
    }

    let payload = tx.signing_payload();
    let public_key = match tx.signing_pub_key.first() {
        Some(&ED25519_KEY_PREFIX) => {
            let key = ed25519::xrpl_key(&tx.signing_pub_key).ok_or_else(|| {
                AuthError::MalformedTransaction("ed25519 SigningPubKey is not 33 bytes".to_string())
            })?;
            ed25519::verify(&key, &payload.message, &tx.txn_signature)
        }
        Some(0x02) | Some(0x03) => {
            ecdsa::verify_prehash(&tx.signing_pub_key, &payload.digest, &tx.txn_signature)
        }
        _ => Err(AuthError::MalformedTransaction(
            "unsupported SigningPubKey encoding".to_string(),
        )),
    }?;

    if let Some(account) = tx.account {
        let signer = account_id(&public_key);
        if signer.0 != account {
            tracing::debug!(
                account = %hex::encode_upper(account),
                signer = %signer,
                "SignIn transaction signed by a key other than the account master key"
            );
        }
    }

    Ok(public_key)
}
