use crate::{
    crypto::{
        address::{AccountId, PublicKey},
        digest::{self, SigningPayload},
        ethereum, xaman,
    },
    error::{AuthError, Result},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported wallet types
///
/// The discriminant is the position of the wallet's entry in [`SCHEMES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(usize)]
pub enum WalletType {
    /// Xaman (formerly Xumm), XRPL-native signing
    Xaman = 0,
    /// Web3Auth, Ethereum `personal_sign` convention over secp256k1
    Web3Auth = 1,
}

/// Everything a scheme verifier needs for one call
pub struct SchemeInput<'a> {
    pub signature: &'a [u8],
    pub challenge: &'a [u8],
    pub payload: &'a SigningPayload,
    pub claimed: &'a AccountId,
}

/// How one wallet type turns a challenge into a verdict
///
/// Each entry pairs a digest rule with a verifier returning the signing key.
/// Adding a wallet means adding an entry to [`SCHEMES`].
pub struct WalletScheme {
    pub wallet: WalletType,
    pub token: &'static str,
    pub description: &'static str,
    pub digest: fn(&[u8]) -> SigningPayload,
    pub verify: fn(&SchemeInput<'_>) -> Result<PublicKey>,
}

/// Dispatch table, one entry per wallet type
pub static SCHEMES: [WalletScheme; 2] = [
    WalletScheme {
        wallet: WalletType::Xaman,
        token: "xaman",
        description: "Xaman wallet: secp256k1 or ed25519 over SHA-512Half, or a signed SignIn transaction",
        digest: digest::xaman_message,
        verify: xaman::verify,
    },
    WalletScheme {
        wallet: WalletType::Web3Auth,
        token: "web3auth",
        description: "Web3Auth: recoverable secp256k1 over the Ethereum personal-message digest",
        digest: digest::personal_message_payload,
        verify: verify_web3auth,
    },
];

fn verify_web3auth(input: &SchemeInput<'_>) -> Result<PublicKey> {
    ethereum::recover_public_key(&input.payload.digest, input.signature)
}

impl WalletType {
    pub const ALL: [WalletType; 2] = [WalletType::Xaman, WalletType::Web3Auth];

    /// Scheme table entry for this wallet type
    pub fn scheme(self) -> &'static WalletScheme {
        &SCHEMES[self as usize]
    }

    pub fn token(self) -> &'static str {
        self.scheme().token
    }

    /// Tokens accepted by [`FromStr`]
    pub fn supported_tokens() -> Vec<&'static str> {
        SCHEMES.iter().map(|scheme| scheme.token).collect()
    }

    /// One line per supported wallet: token and description
    pub fn usage() -> String {
        let width = SCHEMES
            .iter()
            .map(|scheme| scheme.token.len())
            .max()
            .unwrap_or(0);

        let mut out = String::from("Supported wallets:");
        for scheme in &SCHEMES {
            out.push_str(&format!(
                "\n  {:<width$}  {}",
                scheme.token, scheme.description
            ));
        }
        out
    }
}

impl FromStr for WalletType {
    type Err = AuthError;

    /// Case-sensitive exact match on the wallet token
    fn from_str(s: &str) -> Result<Self> {
        SCHEMES
            .iter()
            .find(|scheme| scheme.token == s)
            .map(|scheme| scheme.wallet)
            .ok_or_else(|| AuthError::UnsupportedWallet(s.to_string()))
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("xaman".parse::<WalletType>(), Ok(WalletType::Xaman));
        assert_eq!("web3auth".parse::<WalletType>(), Ok(WalletType::Web3Auth));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Xaman".parse::<WalletType>().is_err());
        assert!("WEB3AUTH".parse::<WalletType>().is_err());
        assert!(" xaman".parse::<WalletType>().is_err());
    }

    #[test]
    fn test_unsupported_wallet() {
        let result = "metamask".parse::<WalletType>();
        assert_eq!(result, Err(AuthError::UnsupportedWallet("metamask".to_string())));
    }

    #[test]
    fn test_every_wallet_has_scheme() {
        for wallet in WalletType::ALL {
            assert_eq!(wallet.scheme().wallet, wallet);
            assert_eq!(wallet.to_string().parse::<WalletType>(), Ok(wallet));
        }
        assert_eq!(WalletType::supported_tokens(), vec!["xaman", "web3auth"]);
    }

    #[test]
    fn test_scheme_table_order_matches_discriminants() {
        assert_eq!(SCHEMES.len(), WalletType::ALL.len());
        for (index, scheme) in SCHEMES.iter().enumerate() {
            assert_eq!(scheme.wallet as usize, index, "entry for {}", scheme.token);
        }
    }

    #[test]
    fn test_schemes_dispatch_to_their_own_digest() {
        let xaman = (WalletType::Xaman.scheme().digest)(b"login-7f3a");
        assert_eq!(xaman, digest::xaman_message(b"login-7f3a"));

        let web3auth = (WalletType::Web3Auth.scheme().digest)(b"login-7f3a");
        assert_eq!(web3auth, digest::personal_message_payload(b"login-7f3a"));
    }

    #[test]
    fn test_usage_lists_descriptions() {
        let usage = WalletType::usage();
        assert!(usage.starts_with("Supported wallets:"));
        for scheme in &SCHEMES {
            let line = usage
                .lines()
                .find(|line| line.trim_start().starts_with(scheme.token))
                .unwrap();
            assert!(line.ends_with(scheme.description));
        }
    }

    #[test]
    fn test_serde_uses_tokens() {
        assert_eq!(serde_json::to_string(&WalletType::Web3Auth).unwrap(), "\"web3auth\"");
        let parsed: WalletType = serde_json::from_str("\"xaman\"").unwrap();
        assert_eq!(parsed, WalletType::Xaman);
    }
}
