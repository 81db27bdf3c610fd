use std::fmt;

/// Signature authentication errors
///
/// Variants fall into two groups. Decoding problems on the caller side
/// (`InvalidHex` through `UnsupportedKeyType`) are reported back as malformed
/// input together with their message. Everything else is a cryptographic or
/// identity rejection and is collapsed into a plain "invalid" verdict by the
/// verifier, so the specific check that failed never reaches the caller.
///
/// # Example
/// ```rust
/// use xrpl_signature_auth::{AuthError, Result};
///
/// fn handle(result: Result<()>) {
///     match result {
///         Ok(()) => println!("Signature accepted"),
///         Err(e) if e.is_malformed() => println!("Bad request: {}", e),
///         Err(_) => println!("Signature rejected"),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Hexadecimal decoding failed
    ///
    /// This error occurs when:
    /// - The input has an odd number of characters
    /// - The input contains characters outside `0-9a-fA-F`
    InvalidHex(String),

    /// Base58 decoding failed
    ///
    /// This error occurs when the address contains characters outside the
    /// XRPL alphabet or is too short to carry a checksum.
    InvalidBase58(String),

    /// The trailing 4 checksum bytes of a base58-check string do not match
    ChecksumMismatch,

    /// Address decoded but is not a classic XRPL account address
    ///
    /// This error occurs when:
    /// - The version byte is not `0x00`
    /// - The payload is not 20 bytes long
    InvalidAddress(String),

    /// Signature byte length is impossible for the selected wallet scheme
    InvalidLength { expected: String, actual: usize },

    /// Wallet type token is not one of the supported wallets
    UnsupportedWallet(String),

    /// No signature was supplied
    EmptySignature,

    /// No challenge was supplied and the configuration disallows it
    EmptyChallenge,

    /// Public key curve is not used by the selected wallet
    UnsupportedKeyType { wallet: String, key: &'static str },

    /// Signature does not verify against the signed payload
    ///
    /// This error occurs when:
    /// - The DER or compact encoding cannot be parsed
    /// - A scalar is zero or out of range
    /// - The signature does not match the payload and key
    InvalidSignature(String),

    /// ECDSA signature uses the high-S form
    NonCanonicalSignature,

    /// Public key recovery from a recoverable signature failed
    RecoveryFailed(String),

    /// Signing key does not belong to the claimed address
    AddressMismatch,

    /// Signed transaction carries a different challenge than the expected one
    ChallengeMismatch,

    /// Signed transaction blob is structurally invalid
    MalformedTransaction(String),
}

impl AuthError {
    /// Whether this error is a caller-side decoding problem rather than a
    /// cryptographic rejection.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidHex(_)
                | AuthError::InvalidBase58(_)
                | AuthError::ChecksumMismatch
                | AuthError::InvalidAddress(_)
                | AuthError::InvalidLength { .. }
                | AuthError::UnsupportedWallet(_)
                | AuthError::EmptySignature
                | AuthError::EmptyChallenge
                | AuthError::UnsupportedKeyType { .. }
        )
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidHex(msg) => {
                write!(f, "Hex decode error: {msg}")
            }
            AuthError::InvalidBase58(msg) => {
                write!(f, "Base58 decode error: {msg}")
            }
            AuthError::ChecksumMismatch => {
                write!(f, "Base58 checksum mismatch")
            }
            AuthError::InvalidAddress(msg) => {
                write!(f, "Invalid XRPL address: {msg}")
            }
            AuthError::InvalidLength { expected, actual } => {
                write!(
                    f,
                    "Invalid signature length: expected {expected}, got {actual} bytes"
                )
            }
            AuthError::UnsupportedWallet(wallet) => {
                write!(
                    f,
                    "Unsupported wallet type '{wallet}' (supported: {})",
                    crate::wallet::WalletType::supported_tokens().join(", ")
                )
            }
            AuthError::EmptySignature => {
                write!(f, "Signature is empty")
            }
            AuthError::EmptyChallenge => {
                write!(f, "Challenge is empty")
            }
            AuthError::UnsupportedKeyType { wallet, key } => {
                write!(f, "{wallet} accounts do not use {key} keys")
            }
            AuthError::InvalidSignature(msg) => {
                write!(f, "Signature verification failed: {msg}")
            }
            AuthError::NonCanonicalSignature => {
                write!(f, "Signature is not in canonical low-S form")
            }
            AuthError::RecoveryFailed(msg) => {
                write!(f, "Public key recovery failed: {msg}")
            }
            AuthError::AddressMismatch => {
                write!(f, "Signing key does not match the claimed address")
            }
            AuthError::ChallengeMismatch => {
                write!(f, "Signed transaction does not carry the expected challenge")
            }
            AuthError::MalformedTransaction(msg) => {
                write!(f, "Malformed signed transaction: {msg}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

pub type Result<T> = std::result::Result<T, AuthError>;
