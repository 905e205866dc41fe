//! Launchseal command-line harness.
//!
//! # Usage
//!
//! ```bash
//! # Secure a plaintext query with a base64 shared secret
//! launchseal secure --key "$KEY" "patientId=123&accession=ABC"
//!
//! # Open it again, taking the key from the environment
//! LAUNCHSEAL_KEY="$KEY" launchseal view "sharedSecretEncryptedUrlQuery=..."
//!
//! # Show the unauthenticated token fields
//! launchseal inspect "https://viewer.example/launch?sharedSecretEncryptedUrlQuery=..."
//! ```
//!
//! Any failure prints `ERROR` on stdout and exits with status 1.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use launchseal::{extract_token, SealError, TokenLayout};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Shared-secret URL launch tokens
#[derive(Parser, Debug)]
#[command(name = "launchseal")]
#[command(about = "Create and open shared-secret URL launch tokens")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt and sign a plaintext query
    Secure {
        /// Base64 shared secret (32 bytes)
        #[arg(short, long, env = "LAUNCHSEAL_KEY", hide_env_values = true)]
        key: String,

        /// Plaintext query to protect
        data: String,
    },

    /// Verify and decrypt a token query
    View {
        /// Base64 shared secret (32 bytes)
        #[arg(short, long, env = "LAUNCHSEAL_KEY", hide_env_values = true)]
        key: String,

        /// Query string or URL carrying the token
        query: String,
    },

    /// Print the token fields as JSON without verifying them
    Inspect {
        /// Query string or URL carrying the token
        query: String,
    },
}

/// Unauthenticated token fields, hex encoded.
#[derive(Serialize, Debug)]
struct Inspection {
    outer_nonce: String,
    hmac_tag: String,
    raw_timestamp: String,
    issued_at: Option<String>,
    signature_nonce: String,
    version: u8,
    gcm_nonce: String,
    gcm_tag: String,
    ciphertext_length: usize,
}

impl From<&TokenLayout<'_>> for Inspection {
    fn from(layout: &TokenLayout<'_>) -> Self {
        Self {
            outer_nonce: hex::encode(layout.outer_nonce),
            hmac_tag: hex::encode(layout.hmac_tag),
            raw_timestamp: format!("{:#018x}", layout.raw_timestamp),
            issued_at: layout.issued_at().ok().map(|t| t.to_rfc3339()),
            signature_nonce: hex::encode(layout.signature_nonce),
            version: layout.version,
            gcm_nonce: hex::encode(layout.gcm_nonce),
            gcm_tag: hex::encode(layout.gcm_tag),
            ciphertext_length: layout.ciphertext.len(),
        }
    }
}

fn inspect(query: &str) -> Result<String, SealError> {
    let token = extract_token(query)?;
    let layout = TokenLayout::parse(&token)?;
    serde_json::to_string_pretty(&Inspection::from(&layout))
        .map_err(|e| SealError::Encoding(e.to_string()))
}

fn run(command: Command) -> Result<String, ()> {
    match command {
        Command::Secure { key, data } => {
            launchseal::secure_with_base64_key(&data, &key).map_err(|_| ())
        }
        Command::View { key, query } => {
            launchseal::view_with_base64_key(&query, &key).map_err(|_| ())
        }
        Command::Inspect { query } => inspect(&query).map_err(|e| {
            tracing::warn!(kind = %e.kind(), "cannot inspect token");
        }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(()) => {
            println!("ERROR");
            ExitCode::FAILURE
        }
    }
}
