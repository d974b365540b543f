//! # ccr CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ccr_cli::call::{run_call, CallArgs};
use ccr_cli::config::{run_config, ConfigArgs};
use ccr_cli::decrypt::{run_decrypt, DecryptArgs};
use ccr_cli::keys::{run_key, KeyArgs};

/// Confidential Compliance Registry CLI
///
/// Key management, signed registry calls, user decryption requests, and
/// registry config validation.
#[derive(Parser, Debug)]
#[command(name = "ccr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ed25519 key generation and address derivation.
    Key(KeyArgs),

    /// Sign and verify registry calls.
    Call(CallArgs),

    /// Build signed user decryption requests.
    Decrypt(DecryptArgs),

    /// Registry config validation.
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Key(args) => run_key(&args),
        Commands::Call(args) => run_call(&args),
        Commands::Decrypt(args) => run_decrypt(&args),
        Commands::Config(args) => run_config(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
