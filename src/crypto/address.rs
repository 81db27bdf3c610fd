use crate::{
    crypto::codec::{decode_base58check, encode_base58check, XRPL_ALPHABET},
    error::{AuthError, Result},
    wallet::WalletType,
};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::fmt;

/// Version byte of a classic XRPL account address
pub const ACCOUNT_ID_VERSION: u8 = 0x00;

/// Prefix byte XRPL places in front of ed25519 public keys
pub const ED25519_KEY_PREFIX: u8 = 0xED;

/// Public key that produced a signature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicKey {
    /// Compressed SEC1 point
    Secp256k1([u8; 33]),
    Ed25519([u8; 32]),
}

impl PublicKey {
    /// Key bytes as XRPL serializes them (`0xED ‖ key` for ed25519)
    pub fn xrpl_bytes(&self) -> Vec<u8> {
        match self {
            PublicKey::Secp256k1(point) => point.to_vec(),
            PublicKey::Ed25519(key) => {
                let mut out = Vec::with_capacity(33);
                out.push(ED25519_KEY_PREFIX);
                out.extend_from_slice(key);
                out
            }
        }
    }
}

/// 20-byte XRPL account identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_address(self))
    }
}

/// Compute `RIPEMD160(SHA256(key))` over the XRPL key encoding
pub fn account_id(public_key: &PublicKey) -> AccountId {
    let sha = Sha256::digest(public_key.xrpl_bytes());
    let ripemd = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripemd);
    AccountId(out)
}

/// Encode an account ID as an `r…` address
pub fn encode_address(account: &AccountId) -> String {
    encode_base58check(ACCOUNT_ID_VERSION, account.as_bytes(), XRPL_ALPHABET)
}

/// Decode an `r…` address to its raw account ID
///
/// # Example
/// ```rust
/// use xrpl_signature_auth::crypto::address::decode_address;
///
/// let account = decode_address("rrrrrrrrrrrrrrrrrrrrrhoLvTp").unwrap();
/// assert_eq!(account.as_bytes(), &[0u8; 20]);
/// ```
pub fn decode_address(address: &str) -> Result<AccountId> {
    let (version, payload) = decode_base58check(address, XRPL_ALPHABET)?;
    if version != ACCOUNT_ID_VERSION {
        return Err(AuthError::InvalidAddress(format!(
            "unexpected version byte 0x{version:02x}"
        )));
    }
    let bytes: [u8; 20] = payload.as_slice().try_into().map_err(|_| {
        AuthError::InvalidAddress(format!(
            "account ID is {} bytes, expected 20",
            payload.len()
        ))
    })?;
    Ok(AccountId(bytes))
}

/// Derive the address controlled by `public_key` under a wallet's convention
///
/// Web3Auth accounts are always secp256k1; Xaman accounts may use either
/// curve.
pub fn derive_address(public_key: &PublicKey, wallet_type: WalletType) -> Result<String> {
    if wallet_type == WalletType::Web3Auth && matches!(public_key, PublicKey::Ed25519(_)) {
        return Err(AuthError::UnsupportedKeyType {
            wallet: wallet_type.to_string(),
            key: "ed25519",
        });
    }
    Ok(encode_address(&account_id(public_key)))
}
