use serde::Deserialize;

/// Policy settings for signature verification
///
/// The verifier itself is stateless; this struct only carries the small
/// amount of policy a deployment may want to change. It can be deserialized
/// from any serde format, with missing fields falling back to the defaults.
///
/// # Example
/// ```rust
/// use xrpl_signature_auth::VerifierConfig;
///
/// let config = VerifierConfig {
///     allow_empty_challenge: false,
/// };
/// assert_eq!(config, VerifierConfig::default());
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifierConfig {
    /// Accept an empty challenge string
    ///
    /// An empty challenge proves nothing about freshness, so it is rejected
    /// as malformed input unless this is set.
    pub allow_empty_challenge: bool,
}
