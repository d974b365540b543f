//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Locking
//!
//! The [`Ledger`] sits behind one `parking_lot::Mutex`: calls are applied
//! strictly one at a time, as blocks would order them. Handlers take the
//! lock for the duration of a synchronous call and never across `.await`.
//! The engine is shared separately so decryption does not contend with
//! call submission.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use ccr_core::Address;
use ccr_crypto::Ed25519KeyPair;
use ccr_fhe::{DecryptionDomain, MockFheEngine};
use ccr_registry::{ComplianceRegistry, ConfigError, InMemoryRoleStore, RegistryConfig};
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

use crate::ledger::{Ledger, TransactionReceipt};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable map keyed by `Uuid`.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Configuration ------------------------------------------------------------

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("neither CCR_OWNER nor CCR_OWNER_KEY_HEX is set")]
    MissingOwner,

    #[error("invalid {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Host configuration, read from the environment.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// YAML registry config. Defaults apply when absent.
    pub registry_config_path: Option<PathBuf>,
    /// Contract address used when no YAML config is given.
    pub contract_address: Address,
    pub owner: Address,
    /// Seed the owner address was derived from, if given that way.
    pub owner_key_hex: Option<String>,
    pub log_json: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("registry_config_path", &self.registry_config_path)
            .field("contract_address", &self.contract_address)
            .field("owner", &self.owner)
            .field(
                "owner_key_hex",
                &self.owner_key_hex.as_ref().map(|_| "[REDACTED]"),
            )
            .field("log_json", &self.log_json)
            .finish()
    }
}

/// Contract address of a deployment configured without YAML.
pub const DEFAULT_CONTRACT_ADDRESS: Address = Address([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0c, 0xc0, 0x01,
]);

impl AppConfig {
    /// Read `PORT`, `CCR_CONFIG`, `CCR_CONTRACT`, `CCR_OWNER`,
    /// `CCR_OWNER_KEY_HEX` and `CCR_LOG_JSON`.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// As [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StartupError> {
        let port = match lookup("PORT") {
            Some(p) => p.parse().map_err(|e| StartupError::InvalidEnv {
                var: "PORT",
                reason: format!("{e}"),
            })?,
            None => 8080,
        };

        let contract_address = match lookup("CCR_CONTRACT") {
            Some(s) => s.parse().map_err(|e| StartupError::InvalidEnv {
                var: "CCR_CONTRACT",
                reason: format!("{e}"),
            })?,
            None => DEFAULT_CONTRACT_ADDRESS,
        };

        let owner_key_hex = lookup("CCR_OWNER_KEY_HEX");
        let owner = match (lookup("CCR_OWNER"), &owner_key_hex) {
            (Some(s), _) => s.parse().map_err(|e| StartupError::InvalidEnv {
                var: "CCR_OWNER",
                reason: format!("{e}"),
            })?,
            (None, Some(seed)) => Ed25519KeyPair::from_seed_hex(seed)
                .map_err(|e| StartupError::InvalidEnv {
                    var: "CCR_OWNER_KEY_HEX",
                    reason: format!("{e}"),
                })?
                .address(),
            (None, None) => return Err(StartupError::MissingOwner),
        };

        let log_json = matches!(
            lookup("CCR_LOG_JSON").as_deref(),
            Some("1") | Some("true")
        );

        Ok(Self {
            port,
            registry_config_path: lookup("CCR_CONFIG").map(PathBuf::from),
            contract_address,
            owner,
            owner_key_hex,
            log_json,
        })
    }

    /// Load the YAML registry config, or defaults for `contract_address`.
    pub fn registry_config(&self) -> Result<RegistryConfig, StartupError> {
        match &self.registry_config_path {
            Some(path) => Ok(RegistryConfig::load(path)?),
            None => {
                let config = RegistryConfig::new(self.contract_address);
                config.validate()?;
                Ok(config)
            }
        }
    }
}

// -- Application State --------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AppState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub engine: Arc<MockFheEngine>,
    pub receipts: Store<TransactionReceipt>,
    pub decryption_domain: DecryptionDomain,
}

impl AppState {
    /// A fresh registry owned by `owner`, over a new mock engine.
    pub fn new(config: RegistryConfig, owner: Address) -> Self {
        let engine = Arc::new(MockFheEngine::new());
        let decryption_domain = config.decryption_domain();
        let registry = ComplianceRegistry::new(
            config,
            Arc::clone(&engine),
            InMemoryRoleStore::new(owner),
        );
        Self {
            ledger: Arc::new(Mutex::new(Ledger::new(registry))),
            engine,
            receipts: Store::new(),
            decryption_domain,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        Ok(Self::new(config.registry_config()?, config.owner))
    }
}
