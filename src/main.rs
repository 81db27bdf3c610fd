use clap::{CommandFactory, FromArgMatches, Parser};
use std::process::ExitCode;
use xrpl_signature_auth::{
    derive_address, SignatureVerifier, VerificationOutcome, VerifierConfig, WalletType,
};

/// Verify that an XRPL address signed a challenge.
///
/// Exit status: 0 authenticated, 1 signature rejected, 2 malformed input.
#[derive(Debug, Parser)]
#[command(name = "xrpl-verify", version, about)]
struct Arguments {
    /// Wallet type (xaman, web3auth)
    #[arg(short, long)]
    wallet: String,

    /// Signature as hex (challenge signature or signed SignIn blob for Xaman,
    /// 65-byte r||s||v for Web3Auth)
    #[arg(short, long)]
    signature: String,

    /// Claimed XRPL address (r...)
    #[arg(short, long)]
    address: String,

    /// Challenge string, passed through untouched
    #[arg(short, long, allow_hyphen_values = true)]
    challenge: String,

    /// Accept an empty challenge
    #[arg(long)]
    allow_empty_challenge: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Arguments::command()
        .after_help(WalletType::usage())
        .get_matches();
    let args = Arguments::from_arg_matches(&matches)?;
    tracing::info!(wallet = %args.wallet, address = %args.address, "verifying signature");

    let verifier = SignatureVerifier::new(VerifierConfig {
        allow_empty_challenge: args.allow_empty_challenge,
    });
    let result = verifier.check(&args.wallet, &args.signature, &args.address, &args.challenge);

    let authenticated_as = match (&result, args.wallet.parse::<WalletType>()) {
        (Ok(public_key), Ok(wallet)) => Some(derive_address(public_key, wallet)?),
        _ => None,
    };
    let outcome = VerificationOutcome::from(result);

    if args.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        match &outcome {
            VerificationOutcome::Valid => {
                println!(
                    "authenticated: {}",
                    authenticated_as.as_deref().unwrap_or(&args.address)
                );
            }
            VerificationOutcome::Invalid => println!("rejected: signature is not valid"),
            VerificationOutcome::MalformedInput(reason) => eprintln!("error: {reason}"),
        }
    }

    Ok(ExitCode::from(outcome.exit_code() as u8))
}
