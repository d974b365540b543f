//! # Call Subcommand
//!
//! Build and check the body of `POST /v1/transactions`.
//!
//! `sign` reads a [`RegistryCall`] JSON file, e.g.
//!
//! ```json
//! {"call": "schedule_audit", "auditee": "0x…", "standard": "gdpr"}
//! ```
//!
//! and prints the [`SignedCall`] for the given nonce. `verify` checks a
//! signed call against a deployment and prints the caller address.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use ccr_registry::{RegistryCall, SignedCall};

use crate::DeploymentArgs;

#[derive(Args, Debug)]
pub struct CallArgs {
    #[command(subcommand)]
    pub command: CallCommand,
}

#[derive(Subcommand, Debug)]
pub enum CallCommand {
    /// Sign a registry call.
    Sign {
        /// Path to the private key file (hex-encoded 32-byte seed).
        #[arg(long)]
        key: PathBuf,
        /// Signer's next nonce, as reported by `GET /v1/nonces/{address}`.
        #[arg(long)]
        nonce: u64,
        #[command(flatten)]
        deployment: DeploymentArgs,
        /// Path to the call JSON.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Verify a signed call and print its caller.
    Verify {
        #[command(flatten)]
        deployment: DeploymentArgs,
        /// Path to the signed call JSON.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

pub fn run_call(args: &CallArgs) -> Result<u8> {
    match &args.command {
        CallCommand::Sign {
            key,
            nonce,
            deployment,
            file,
        } => {
            let signed = sign_call_file(key, *nonce, deployment, file)?;
            println!("{}", serde_json::to_string_pretty(&signed)?);
            Ok(0)
        }
        CallCommand::Verify { deployment, file } => cmd_verify(deployment, file),
    }
}

fn sign_call_file(
    key_path: &Path,
    nonce: u64,
    deployment: &DeploymentArgs,
    file: &Path,
) -> Result<SignedCall> {
    let key = crate::load_key(key_path)?;
    let call: RegistryCall = crate::read_json(file)?;
    let domain = deployment.registry_config()?.transaction_domain();
    tracing::debug!(call = call.name(), nonce, signer = %key.address(), "signing call");
    SignedCall::sign(&domain, &key, nonce, call).context("failed to sign call")
}

fn cmd_verify(deployment: &DeploymentArgs, file: &Path) -> Result<u8> {
    let signed: SignedCall = crate::read_json(file)?;
    let domain = deployment.registry_config()?.transaction_domain();
    match signed.verify(&domain) {
        Ok(caller) => {
            println!("OK: {} by {caller} (nonce {})", signed.call.name(), signed.nonce);
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}
