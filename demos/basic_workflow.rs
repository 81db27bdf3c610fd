// demos/basic_workflow.rs

use k256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey};
use rand::rngs::OsRng;
use xrpl_signature_auth::{
    build_digest, derive_address, PublicKey, SignatureVerifier, VerificationOutcome,
    VerifierConfig, WalletType,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("XRPL Signature Auth Basic Workflow");

    // 1. Setup verifier
    let verifier = SignatureVerifier::new(VerifierConfig::default());

    // 2. Challenge issued by the relying party (normally stored per session)
    let challenge = "example.com:1760021404:login";
    println!("Issued challenge: {}", challenge);

    // 3. Simulate a wallet key pair
    let signing_key = SigningKey::random(&mut OsRng);
    let point = signing_key.verifying_key().to_encoded_point(true);
    let public_key = PublicKey::Secp256k1(point.as_bytes().try_into()?);
    let address = derive_address(&public_key, WalletType::Xaman)?;
    println!("Wallet address: {}", address);

    // 4. Xaman signs SHA-512Half of the prefixed challenge
    let xaman_digest = build_digest(challenge, WalletType::Xaman).digest;
    let xaman_signature: Signature = signing_key.sign_prehash(&xaman_digest)?;
    let xaman_hex = hex::encode(xaman_signature.to_der().as_bytes());

    // 5. Web3Auth signs the personal_sign digest with a recovery byte
    let web3auth_digest = build_digest(challenge, WalletType::Web3Auth).digest;
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(&web3auth_digest)?;
    let mut web3auth_bytes = signature.to_bytes().to_vec();
    web3auth_bytes.push(recovery_id.to_byte() + 27);
    let web3auth_hex = format!("0x{}", hex::encode(web3auth_bytes));

    // 6. Verify both, then a replay against a different challenge
    let attempts = [
        ("xaman", xaman_hex.as_str(), challenge),
        ("web3auth", web3auth_hex.as_str(), challenge),
        ("xaman", xaman_hex.as_str(), "example.com:1760021405:login"),
    ];

    for (wallet, signature, challenge) in attempts {
        println!("\n{} attempt for '{}'...", wallet, challenge);
        match verifier.verify(wallet, signature, &address, challenge) {
            VerificationOutcome::Valid => println!("Authentication successful!"),
            VerificationOutcome::Invalid => println!("Authentication failed: invalid signature"),
            VerificationOutcome::MalformedInput(reason) => {
                println!("Authentication failed: {}", reason)
            }
        }
    }

    Ok(())
}
