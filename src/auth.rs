use crate::{
    config::VerifierConfig,
    crypto::{
        address::{account_id, decode_address, PublicKey},
        codec::decode_hex,
    },
    error::{AuthError, Result},
    wallet::{SchemeInput, WalletType},
};
use serde::{Deserialize, Serialize};

/// Signature verification service for XRPL wallet sign-in
///
/// This service answers one question: did the key controlling a claimed
/// XRPL address sign this exact challenge?
/// - Wallet-type dispatch to the matching digest rule and signature scheme
/// - Public key verification or recovery
/// - Address binding against the claimed account
///
/// The service holds only immutable policy. Challenge issuance, replay
/// protection and sessions belong to the caller.
#[derive(Clone, Debug, Default)]
pub struct SignatureVerifier {
    pub config: VerifierConfig,
}

/// Request structure for verifying a signed challenge
///
/// This contains the four caller-supplied inputs:
/// - The wallet type token (`xaman` or `web3auth`)
/// - The signature, hex encoded
/// - The XRPL address the caller claims to control
/// - The original challenge, byte-for-byte as issued
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub wallet: String,
    pub signature: String,
    pub address: String,
    pub challenge: String,
}

/// Terminal result of a verification call
///
/// `Invalid` deliberately carries no detail: callers learn that the proof
/// was rejected, not which check rejected it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum VerificationOutcome {
    Valid,
    Invalid,
    MalformedInput(String),
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationOutcome::Valid)
    }

    /// Process exit status for this outcome: 0 valid, 1 invalid, 2 malformed
    pub fn exit_code(&self) -> i32 {
        match self {
            VerificationOutcome::Valid => 0,
            VerificationOutcome::Invalid => 1,
            VerificationOutcome::MalformedInput(_) => 2,
        }
    }
}

impl From<Result<PublicKey>> for VerificationOutcome {
    fn from(result: Result<PublicKey>) -> Self {
        match result {
            Ok(_) => VerificationOutcome::Valid,
            Err(e) if e.is_malformed() => {
                tracing::debug!(error = %e, "malformed verification input");
                VerificationOutcome::MalformedInput(e.to_string())
            }
            Err(e) => {
                tracing::debug!(error = %e, "signature rejected");
                VerificationOutcome::Invalid
            }
        }
    }
}

impl SignatureVerifier {
    /// Create a new verifier with the given policy
    ///
    /// # Example
    /// ```rust
    /// use xrpl_signature_auth::{SignatureVerifier, VerifierConfig};
    ///
    /// let verifier = SignatureVerifier::new(VerifierConfig {
    ///     allow_empty_challenge: false,
    /// });
    /// ```
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Verify a signed challenge and collapse the result into an outcome
    ///
    /// # Arguments
    /// * `wallet_type` - Wallet token, `xaman` or `web3auth` (case-sensitive)
    /// * `signature_hex` - Hex-encoded signature, optional `0x` prefix
    /// * `claimed_address` - XRPL `r…` address
    /// * `challenge` - Challenge string, not trimmed
    ///
    /// # Example
    /// ```rust
    /// use xrpl_signature_auth::{SignatureVerifier, VerificationOutcome};
    ///
    /// let verifier = SignatureVerifier::default();
    /// let outcome = verifier.verify(
    ///     "metamask",
    ///     "00",
    ///     "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
    ///     "login-7f3a",
    /// );
    /// assert!(matches!(outcome, VerificationOutcome::MalformedInput(_)));
    /// ```
    pub fn verify(
        &self,
        wallet_type: &str,
        signature_hex: &str,
        claimed_address: &str,
        challenge: &str,
    ) -> VerificationOutcome {
        self.check(wallet_type, signature_hex, claimed_address, challenge)
            .into()
    }

    /// Verify a [`VerificationRequest`]
    pub fn verify_request(&self, request: &VerificationRequest) -> VerificationOutcome {
        self.verify(
            &request.wallet,
            &request.signature,
            &request.address,
            &request.challenge,
        )
    }

    /// Same as [`verify`](Self::verify) with an already parsed wallet type
    pub fn verify_wallet(
        &self,
        wallet_type: WalletType,
        signature_hex: &str,
        claimed_address: &str,
        challenge: &str,
    ) -> VerificationOutcome {
        self.check_wallet(wallet_type, signature_hex, claimed_address, challenge)
            .into()
    }

    /// Verify and return the signing key, keeping the specific error
    ///
    /// Intended for callers that want to log why a signature was rejected.
    /// Do not forward rejection details to the end user.
    ///
    /// # Errors
    /// - Decoding problems (`AuthError::is_malformed`) for bad hex, bad
    ///   address, unknown wallet type, impossible length or empty input
    /// - Rejections for everything that fails cryptographically or does not
    ///   bind to the claimed address
    pub fn check(
        &self,
        wallet_type: &str,
        signature_hex: &str,
        claimed_address: &str,
        challenge: &str,
    ) -> Result<PublicKey> {
        let wallet = wallet_type.parse::<WalletType>()?;
        self.check_wallet(wallet, signature_hex, claimed_address, challenge)
    }

    /// Typed variant of [`check`](Self::check)
    pub fn check_wallet(
        &self,
        wallet_type: WalletType,
        signature_hex: &str,
        claimed_address: &str,
        challenge: &str,
    ) -> Result<PublicKey> {
        // Decode inputs
        if signature_hex.is_empty() {
            return Err(AuthError::EmptySignature);
        }
        let signature = decode_hex(signature_hex)?;
        if signature.is_empty() {
            return Err(AuthError::EmptySignature);
        }
        let claimed = decode_address(claimed_address)?;
        if challenge.is_empty() && !self.config.allow_empty_challenge {
            return Err(AuthError::EmptyChallenge);
        }

        // Build digest
        let scheme = wallet_type.scheme();
        let payload = (scheme.digest)(challenge.as_bytes());
        tracing::debug!(
            wallet = %wallet_type,
            digest = %hex::encode(payload.digest),
            signature_len = signature.len(),
            "verifying challenge signature"
        );

        // Verify or recover the signing key
        let public_key = (scheme.verify)(&SchemeInput {
            signature: &signature,
            challenge: challenge.as_bytes(),
            payload: &payload,
            claimed: &claimed,
        })?;

        // Bind to the claimed address
        let derived = account_id(&public_key);
        if derived != claimed {
            tracing::debug!(derived = %derived, claimed = %claimed, "address mismatch");
            return Err(AuthError::AddressMismatch);
        }

        Ok(public_key)
    }
}

/// Verify a signed challenge with the default policy
///
/// This is the whole engine in one call: a pure function of its four inputs.
///
/// # Example
/// ```rust
/// use xrpl_signature_auth::{verify, VerificationOutcome};
///
/// let outcome = verify("xaman", "abc", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "login-7f3a");
/// assert!(matches!(outcome, VerificationOutcome::MalformedInput(_)));
/// ```
pub fn verify(
    wallet_type: &str,
    signature_hex: &str,
    claimed_address: &str,
    challenge: &str,
) -> VerificationOutcome {
    SignatureVerifier::default().verify(wallet_type, signature_hex, claimed_address, challenge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{address::encode_address, digest::build_digest};
    use k256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey};

    fn create_test_verifier() -> SignatureVerifier {
        SignatureVerifier::new(VerifierConfig::default())
    }

    fn xaman_fixture(challenge: &str) -> (String, String) {
        let key = SigningKey::from_bytes(&[0x5Au8; 32].into()).unwrap();
        let digest = build_digest(challenge, WalletType::Xaman).digest;
        let signature: Signature = key.sign_prehash(&digest).unwrap();
        let point = key.verifying_key().to_encoded_point(true);
        let public_key = PublicKey::Secp256k1(point.as_bytes().try_into().unwrap());
        (
            hex::encode(signature.to_der().as_bytes()),
            encode_address(&account_id(&public_key)),
        )
    }

    #[test]
    fn test_verify_valid_xaman() {
        let verifier = create_test_verifier();
        let (signature, address) = xaman_fixture("login-7f3a");

        let outcome = verifier.verify("xaman", &signature, &address, "login-7f3a");
        assert_eq!(outcome, VerificationOutcome::Valid);
    }

    #[test]
    fn test_verify_with_empty_signature() {
        let verifier = create_test_verifier();
        let outcome = verifier.verify("xaman", "", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "c");
        assert_eq!(
            outcome,
            VerificationOutcome::MalformedInput("Signature is empty".to_string())
        );

        let outcome = verifier.verify("xaman", "0x", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "c");
        assert!(matches!(outcome, VerificationOutcome::MalformedInput(_)));
    }

    #[test]
    fn test_verify_with_odd_hex() {
        let verifier = create_test_verifier();
        let outcome = verifier.verify("xaman", "abc", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "c");
        match outcome {
            VerificationOutcome::MalformedInput(reason) => assert!(reason.contains("Hex")),
            other => panic!("expected malformed input, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_with_empty_challenge() {
        let verifier = create_test_verifier();
        let (signature, address) = xaman_fixture("");

        let outcome = verifier.verify("xaman", &signature, &address, "");
        assert_eq!(
            outcome,
            VerificationOutcome::MalformedInput("Challenge is empty".to_string())
        );

        let permissive = SignatureVerifier::new(VerifierConfig {
            allow_empty_challenge: true,
        });
        let outcome = permissive.verify("xaman", &signature, &address, "");
        assert_eq!(outcome, VerificationOutcome::Valid);
    }

    #[test]
    fn test_verify_with_unsupported_wallet() {
        let verifier = create_test_verifier();
        let outcome = verifier.verify("metamask", "00", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "c");
        match outcome {
            VerificationOutcome::MalformedInput(reason) => assert!(reason.contains("metamask")),
            other => panic!("expected malformed input, got {:?}", other),
        }
    }

    #[test]
    fn test_check_reports_address_mismatch() {
        let verifier = create_test_verifier();
        let (signature, _) = xaman_fixture("login-7f3a");
        let other = encode_address(&crate::crypto::address::AccountId([3u8; 20]));

        let result = verifier.check("xaman", &signature, &other, "login-7f3a");
        assert_eq!(result, Err(AuthError::AddressMismatch));

        let outcome = verifier.verify("xaman", &signature, &other, "login-7f3a");
        assert_eq!(outcome, VerificationOutcome::Invalid);
    }

    #[test]
    fn test_verify_request() {
        let verifier = create_test_verifier();
        let (signature, address) = xaman_fixture("login-7f3a");
        let request = VerificationRequest {
            wallet: "xaman".to_string(),
            signature,
            address,
            challenge: "login-7f3a".to_string(),
        };
        assert!(verifier.verify_request(&request).is_valid());
    }

    #[test]
    fn test_outcome_exit_codes_and_json() {
        assert_eq!(VerificationOutcome::Valid.exit_code(), 0);
        assert_eq!(VerificationOutcome::Invalid.exit_code(), 1);
        assert_eq!(VerificationOutcome::MalformedInput("x".into()).exit_code(), 2);

        assert_eq!(
            serde_json::to_string(&VerificationOutcome::Valid).unwrap(),
            r#"{"outcome":"valid"}"#
        );
        assert_eq!(
            serde_json::to_string(&VerificationOutcome::MalformedInput("bad hex".into())).unwrap(),
            r#"{"outcome":"malformed_input","reason":"bad hex"}"#
        );
    }
}
