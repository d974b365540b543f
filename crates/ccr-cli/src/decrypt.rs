//! # Decrypt Subcommand
//!
//! Builds the signed body for `POST /v1/decrypt/user`:
//!
//! ```json
//! {"request": {"handles": [...], "contract": "0x…", ...}, "signature": "…"}
//! ```
//!
//! The request is bound to the deployment's decryption domain, names the
//! registry as the contract, and is valid from `--start` (default now) for
//! `--duration-days`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use ccr_core::Timestamp;
use ccr_fhe::{Handle, UserDecryptRequest, MAX_DURATION_DAYS};

use crate::DeploymentArgs;

#[derive(Args, Debug)]
pub struct DecryptArgs {
    #[command(subcommand)]
    pub command: DecryptCommand,
}

#[derive(Subcommand, Debug)]
pub enum DecryptCommand {
    /// Sign a user decryption request.
    Request {
        /// Path to the requester's private key file.
        #[arg(long)]
        key: PathBuf,
        #[command(flatten)]
        deployment: DeploymentArgs,
        /// Handle to decrypt. Repeat for several.
        #[arg(long = "handle", required = true)]
        handles: Vec<Handle>,
        /// Validity window in days.
        #[arg(long, default_value_t = 1)]
        duration_days: u32,
        /// Start of the validity window (RFC 3339, UTC). Defaults to now.
        #[arg(long)]
        start: Option<String>,
    },
}

pub fn run_decrypt(args: &DecryptArgs) -> Result<u8> {
    match &args.command {
        DecryptCommand::Request {
            key,
            deployment,
            handles,
            duration_days,
            start,
        } => {
            let body = build_request(
                key,
                deployment,
                handles.clone(),
                *duration_days,
                start.as_deref(),
            )?;
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(0)
        }
    }
}

fn build_request(
    key_path: &Path,
    deployment: &DeploymentArgs,
    handles: Vec<Handle>,
    duration_days: u32,
    start: Option<&str>,
) -> Result<serde_json::Value> {
    if duration_days == 0 || duration_days > MAX_DURATION_DAYS {
        anyhow::bail!("--duration-days must be between 1 and {MAX_DURATION_DAYS}");
    }
    let key = crate::load_key(key_path)?;
    let config = deployment.registry_config()?;
    let start_timestamp = match start {
        Some(s) => Timestamp::parse(s).with_context(|| format!("invalid --start {s:?}"))?,
        None => Timestamp::now(),
    };

    let request = UserDecryptRequest {
        handles,
        contract: config.contract_address,
        public_key: key.public_key(),
        start_timestamp,
        duration_days,
    };
    let signature = request
        .sign(&config.decryption_domain(), &key)
        .context("failed to sign decryption request")?;
    tracing::debug!(requester = %key.address(), handles = request.handles.len(), "signed decryption request");

    Ok(serde_json::json!({
        "request": request,
        "signature": signature,
    }))
}
