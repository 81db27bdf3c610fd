pub mod address;
pub mod codec;
pub mod digest;
pub mod ecdsa;
pub mod ed25519;
pub mod ethereum;
pub mod transaction;
pub mod xaman;

// Re-export main functions for easier access
pub use address::{decode_address, derive_address, AccountId, PublicKey};
pub use codec::{decode_base58check, decode_hex, encode_base58check};
pub use digest::{build_digest, SigningPayload};
