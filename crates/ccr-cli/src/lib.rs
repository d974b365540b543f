//! # ccr-cli — CLI Tool for the Confidential Compliance Registry
//!
//! Provides the `ccr` command-line interface for operators and integrators
//! who talk to a registry host without a wallet.
//!
//! ## Subcommands
//!
//! - `ccr key` — Ed25519 key generation and address derivation.
//! - `ccr call` — Sign and verify registry calls for `POST /v1/transactions`.
//! - `ccr decrypt` — Build signed bodies for `POST /v1/decrypt/user`.
//! - `ccr config` — Validate a registry YAML config.
//!
//! ```bash
//! ccr key keygen --output keys --prefix auditor
//! ccr call sign --key keys/auditor.key --contract 0x…c0c01 --nonce 0 call.json
//! ccr config check registry.yaml
//! ```

pub mod call;
pub mod config;
pub mod decrypt;
pub mod keys;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ccr_core::Address;
use ccr_crypto::Ed25519KeyPair;
use ccr_registry::RegistryConfig;
use clap::Args;

/// Which registry deployment a signature is bound to.
#[derive(Args, Debug, Clone)]
pub struct DeploymentArgs {
    /// Registry YAML config. Takes precedence over `--contract`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Registry contract address, with default domain settings.
    #[arg(long)]
    pub contract: Option<Address>,
}

impl DeploymentArgs {
    pub fn registry_config(&self) -> Result<RegistryConfig> {
        match (&self.config, self.contract) {
            (Some(path), _) => RegistryConfig::load(path)
                .with_context(|| format!("failed to load registry config: {}", path.display())),
            (None, Some(contract)) => {
                let config = RegistryConfig::new(contract);
                config.validate().context("invalid contract address")?;
                Ok(config)
            }
            (None, None) => bail!("one of --config or --contract is required"),
        }
    }
}

/// Load a key pair from a file holding its hex-encoded 32-byte seed.
pub fn load_key(path: &Path) -> Result<Ed25519KeyPair> {
    if !path.exists() {
        bail!("private key file not found: {}", path.display());
    }
    let seed = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read private key: {}", path.display()))?;
    Ed25519KeyPair::from_seed_hex(seed.trim())
        .map_err(|e| anyhow::anyhow!("invalid private key in {}: {e}", path.display()))
}

/// Read and parse a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON: {}", path.display()))
}
