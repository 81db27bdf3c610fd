use crate::error::{AuthError, Result};
use sha2::{Digest, Sha256};

/// Base58 alphabet used by the XRP Ledger
pub const XRPL_ALPHABET: &bs58::Alphabet = bs58::Alphabet::RIPPLE;

const CHECKSUM_LEN: usize = 4;

/// Decode a hexadecimal string into bytes
///
/// An optional `0x` prefix is accepted since Web3 signing libraries emit it.
///
/// # Example
/// ```rust
/// use xrpl_signature_auth::crypto::codec::decode_hex;
///
/// assert_eq!(decode_hex("0xdead").unwrap(), vec![0xde, 0xad]);
/// assert!(decode_hex("abc").is_err());
/// ```
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map_err(|e| AuthError::InvalidHex(e.to_string()))
}

/// Decode a base58-check string into its version byte and payload
///
/// The checksum is the first 4 bytes of `SHA256(SHA256(version ‖ payload))`
/// and must match the trailing 4 decoded bytes.
pub fn decode_base58check(s: &str, alphabet: &bs58::Alphabet) -> Result<(u8, Vec<u8>)> {
    let raw = bs58::decode(s)
        .with_alphabet(alphabet)
        .into_vec()
        .map_err(|e| AuthError::InvalidBase58(e.to_string()))?;

    if raw.len() < 1 + CHECKSUM_LEN {
        return Err(AuthError::InvalidBase58(format!(
            "decoded {} bytes, too short for version and checksum",
            raw.len()
        )));
    }

    let (body, checksum) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum_of(body) != checksum {
        return Err(AuthError::ChecksumMismatch);
    }

    Ok((body[0], body[1..].to_vec()))
}

/// Encode a version byte and payload as a base58-check string
pub fn encode_base58check(version: u8, payload: &[u8], alphabet: &bs58::Alphabet) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = checksum_of(&data);
    data.extend_from_slice(&checksum);

    bs58::encode(data).with_alphabet(alphabet).into_string()
}

fn checksum_of(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = Sha256::digest(Sha256::digest(data));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}
