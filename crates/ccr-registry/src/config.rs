//! # Registry Configuration
//!
//! Loaded from YAML. Only `contract_address` is required; the signing
//! domain fields have defaults. Score and retention bounds, the violation
//! threshold and the penalty multipliers are fixed and cannot be set here;
//! unknown keys are rejected.
//!
//! ```yaml
//! contract_address: "0x00000000000000000000000000000000000c0c01"
//! chain_id: 9000
//! ```

use std::path::{Path, PathBuf};

use ccr_core::Address;
use ccr_fhe::DecryptionDomain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transaction::TransactionDomain;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to parse YAML at {}: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to parse YAML: {0}")]
    YamlParseStr(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// The registry's own address. Every ciphertext it stores is allowed to
    /// this address, and decryption requests must name it.
    pub contract_address: Address,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_domain_name")]
    pub domain_name: String,
    #[serde(default = "default_domain_version")]
    pub domain_version: String,
}

fn default_chain_id() -> u64 {
    9000
}

fn default_domain_name() -> String {
    "ConfidentialComplianceRegistry".to_string()
}

fn default_domain_version() -> String {
    "1".to_string()
}

impl RegistryConfig {
    /// Defaults for everything except the contract address.
    pub fn new(contract_address: Address) -> Self {
        Self {
            contract_address,
            chain_id: default_chain_id(),
            domain_name: default_domain_name(),
            domain_version: default_domain_version(),
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io(e)
            }
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contract_address.is_zero() {
            return Err(ConfigError::Invalid(
                "contract_address must not be the zero address".into(),
            ));
        }
        if self.domain_name.trim().is_empty() {
            return Err(ConfigError::Invalid("domain_name must not be empty".into()));
        }
        Ok(())
    }

    /// Signing domain for user decryption requests against this registry.
    pub fn decryption_domain(&self) -> DecryptionDomain {
        DecryptionDomain {
            name: self.domain_name.clone(),
            version: self.domain_version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.contract_address,
        }
    }

    /// Signing domain for calls submitted to this registry.
    pub fn transaction_domain(&self) -> TransactionDomain {
        TransactionDomain {
            name: self.domain_name.clone(),
            version: self.domain_version.clone(),
            chain_id: self.chain_id,
            registry: self.contract_address,
        }
    }
}
