//! # Key Subcommand
//!
//! Ed25519 key generation and address derivation. Key files hold the
//! hex-encoded 32-byte seed (`.key`) or public key (`.pub`); nothing else.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use ccr_crypto::{Ed25519KeyPair, Ed25519PublicKey};

#[derive(Args, Debug)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub command: KeyCommand,
}

#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// Generate a new Ed25519 keypair.
    Keygen {
        /// Output directory for the keypair files.
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
        /// Prefix for the key filenames.
        #[arg(long, default_value = "ccr")]
        prefix: String,
    },
    /// Print the registry address of a key.
    Address {
        /// A `.key` (seed) or `.pub` (public key) file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

pub fn run_key(args: &KeyArgs) -> Result<u8> {
    match &args.command {
        KeyCommand::Keygen { output, prefix } => cmd_keygen(output, prefix),
        KeyCommand::Address { file } => cmd_address(file),
    }
}

fn cmd_keygen(output_dir: &Path, prefix: &str) -> Result<u8> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let key = Ed25519KeyPair::generate();
    let pub_hex = key.public_key().to_hex();

    let key_path = output_dir.join(format!("{prefix}.key"));
    let pub_path = output_dir.join(format!("{prefix}.pub"));

    std::fs::write(&key_path, key.seed_hex())
        .with_context(|| format!("failed to write private key: {}", key_path.display()))?;
    std::fs::write(&pub_path, &pub_hex)
        .with_context(|| format!("failed to write public key: {}", pub_path.display()))?;

    tracing::info!(address = %key.address(), "generated keypair");
    println!("OK: generated Ed25519 keypair");
    println!("  Private key: {}", key_path.display());
    println!("  Public key:  {}", pub_path.display());
    println!("  Address:     {}", key.address());
    Ok(0)
}

fn cmd_address(file: &Path) -> Result<u8> {
    if !file.exists() {
        bail!("key file not found: {}", file.display());
    }
    let address = if file.extension().is_some_and(|ext| ext == "pub") {
        let hex = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read public key: {}", file.display()))?;
        Ed25519PublicKey::from_hex(hex.trim())
            .map_err(|e| anyhow::anyhow!("invalid public key: {e}"))?
            .address()
    } else {
        crate::load_key(file)?.address()
    };
    println!("{address}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keygen_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cmd_keygen(dir.path(), "test").unwrap(), 0);

        let seed = std::fs::read_to_string(dir.path().join("test.key")).unwrap();
        assert_eq!(seed.len(), 64);
        let public = std::fs::read_to_string(dir.path().join("test.pub")).unwrap();
        assert_eq!(public.len(), 64);

        let key = crate::load_key(&dir.path().join("test.key")).unwrap();
        assert_eq!(key.public_key().to_hex(), public);
    }

    #[test]
    fn address_from_either_file() {
        let dir = tempfile::tempdir().unwrap();
        cmd_keygen(dir.path(), "a").unwrap();
        assert_eq!(cmd_address(&dir.path().join("a.key")).unwrap(), 0);
        assert_eq!(cmd_address(&dir.path().join("a.pub")).unwrap(), 0);
    }

    #[test]
    fn missing_key_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cmd_address(&dir.path().join("none.key")).is_err());
    }
}
