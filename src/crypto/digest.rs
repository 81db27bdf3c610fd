use crate::wallet::WalletType;
use easy_hasher::easy_hasher::raw_keccak256;
use sha2::{Digest, Sha512};

/// XRPL hash prefix for free-form challenge messages (`MSG\0`)
pub const MESSAGE_PREFIX: [u8; 4] = *b"MSG\0";

/// XRPL hash prefix for single-signed transactions (`STX\0`)
pub const TRANSACTION_SIGN_PREFIX: [u8; 4] = *b"STX\0";

/// Ethereum `personal_sign` preamble
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Bytes handed to a signature scheme
///
/// ed25519 signs `message` directly; ECDSA schemes sign the 32-byte `digest`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningPayload {
    pub message: Vec<u8>,
    pub digest: [u8; 32],
}

/// First 32 bytes of SHA-512
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let out = Sha512::digest(data);
    let mut half = [0u8; 32];
    half.copy_from_slice(&out[..32]);
    half
}

/// XRPL payload: `prefix ‖ body`, hashed with SHA-512Half
pub fn xrpl_payload(prefix: [u8; 4], body: &[u8]) -> SigningPayload {
    let mut message = Vec::with_capacity(prefix.len() + body.len());
    message.extend_from_slice(&prefix);
    message.extend_from_slice(body);
    let digest = sha512_half(&message);
    SigningPayload { message, digest }
}

/// Ethereum personal-message payload for `challenge`
///
/// The length is the decimal byte length of the UTF-8 challenge.
pub fn personal_message_payload(challenge: &[u8]) -> SigningPayload {
    let mut message = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + 20 + challenge.len());
    message.extend_from_slice(PERSONAL_MESSAGE_PREFIX.as_bytes());
    message.extend_from_slice(challenge.len().to_string().as_bytes());
    message.extend_from_slice(challenge);

    let hash = raw_keccak256(message.clone()).to_vec();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hash);
    SigningPayload { message, digest }
}

/// Build the payload a wallet signs for `challenge`
///
/// # Example
/// ```rust
/// use xrpl_signature_auth::{crypto::digest::build_digest, WalletType};
///
/// let xaman = build_digest("login-7f3a", WalletType::Xaman);
/// let web3auth = build_digest("login-7f3a", WalletType::Web3Auth);
/// assert_ne!(xaman.digest, web3auth.digest);
/// ```
pub fn build_digest(challenge: &str, wallet_type: WalletType) -> SigningPayload {
    (wallet_type.scheme().digest)(challenge.as_bytes())
}

/// Xaman digest rule for a free-form challenge
pub(crate) fn xaman_message(challenge: &[u8]) -> SigningPayload {
    xrpl_payload(MESSAGE_PREFIX, challenge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha512_half_known_vector() {
        // SHA-512("abc") = ddaf35a193617aba cc417349ae204131 12e6fa4e89a97ea2 0a9eeee64b55d39a ...
        let half = sha512_half(b"abc");
        assert_eq!(
            hex::encode(half),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a"
        );
    }

    #[test]
    fn test_personal_message_known_vector() {
        // hashMessage("hello") from ethers.js
        let payload = personal_message_payload(b"hello");
        assert_eq!(
            hex::encode(payload.digest),
            "50b2c43fd39106bafbba0da34fc430e1f91e3c96ea2acee2bc34119f92b37750"
        );
        assert_eq!(payload.message, b"\x19Ethereum Signed Message:\n5hello".to_vec());
    }

    #[test]
    fn test_personal_message_counts_bytes() {
        // "é" is two UTF-8 bytes
        let payload = personal_message_payload("é".as_bytes());
        assert!(payload.message.ends_with("2é".as_bytes()));
    }

    #[test]
    fn test_xaman_message_prefixed() {
        let payload = build_digest("login-7f3a", WalletType::Xaman);
        assert_eq!(&payload.message[..4], b"MSG\0");
        assert_eq!(&payload.message[4..], b"login-7f3a");
        assert_eq!(payload.digest, sha512_half(&payload.message));
    }

    #[test]
    fn test_whitespace_is_significant() {
        let plain = build_digest("login-7f3a", WalletType::Xaman);
        let padded = build_digest(" login-7f3a ", WalletType::Xaman);
        assert_ne!(plain.digest, padded.digest);
    }

    #[test]
    fn test_wallet_rules_differ() {
        let xaman = build_digest("login-7f3a", WalletType::Xaman);
        let web3auth = build_digest("login-7f3a", WalletType::Web3Auth);
        assert_ne!(xaman.digest, web3auth.digest);
        assert_ne!(xaman.message, web3auth.message);
    }
}
