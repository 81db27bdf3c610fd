//! # xrpl-signature-auth
//!
//! A Rust library for **XRPL wallet challenge-signature authentication**.
//! Verifies that the private key controlling a claimed XRP Ledger address
//! signed a server-issued challenge, for the wallet conventions used in
//! practice.
//!
//! ## Features
//!
//! - **Xaman** - secp256k1 (DER, low-S) or ed25519 challenge signatures over
//!   SHA-512Half, and signed SignIn transactions carrying the challenge as a memo
//! - **Web3Auth** - recoverable secp256k1 signatures over the Ethereum
//!   `personal_sign` digest
//! - **Address binding** - `RIPEMD160(SHA256(key))` compared byte-for-byte with
//!   the decoded claimed address
//! - **Three-way outcome** - valid, invalid, or malformed input with a reason
//! - **Stateless Design** - pure function of its inputs, safe to share across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use xrpl_signature_auth::{SignatureVerifier, VerificationOutcome, VerifierConfig};
//!
//! let verifier = SignatureVerifier::new(VerifierConfig::default());
//!
//! let outcome = verifier.verify(
//!     "web3auth",
//!     "0x1234",
//!     "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
//!     "example.com:1760021404:login",
//! );
//!
//! match outcome {
//!     VerificationOutcome::Valid => println!("Authenticated"),
//!     VerificationOutcome::Invalid => println!("Signature rejected"),
//!     VerificationOutcome::MalformedInput(reason) => println!("Bad request: {}", reason),
//! }
//! ```
//!
//! ## Command line
//!
//! ```bash
//! xrpl-verify --wallet xaman --signature <hex> --address <r-address> --challenge <text>
//! ```

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod wallet;

// Re-export main types for easier access
pub use auth::{verify, SignatureVerifier, VerificationOutcome, VerificationRequest};
pub use config::VerifierConfig;
pub use crypto::{build_digest, derive_address, PublicKey};
pub use error::{AuthError, Result};
pub use wallet::WalletType;
