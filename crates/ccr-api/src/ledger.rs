//! # Ledger
//!
//! The host side of call submission. The ledger wraps one registry and the
//! per-signer nonce table, and turns a [`SignedCall`] into a committed
//! transaction:
//!
//! 1. verify the signature under the registry's transaction domain,
//! 2. require the nonce to equal the signer's next expected nonce,
//! 3. execute the call as the signer's address at the given block time,
//! 4. advance the nonce and return a receipt.
//!
//! A rejected call does not consume its nonce. The same nonce may be
//! resubmitted with a corrected call.

use std::collections::HashMap;

use ccr_core::{Address, Timestamp};
use ccr_fhe::MockFheEngine;
use ccr_registry::{
    CallContext, ComplianceRegistry, InMemoryRoleStore, RegistryError, RegistryEvent, SignedCall,
    TransactionDomain,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The registry instantiation this host serves.
pub type HostRegistry = ComplianceRegistry<MockFheEngine, InMemoryRoleStore>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("nonce mismatch for {signer}: expected {expected}, got {got}")]
    NonceMismatch {
        signer: Address,
        expected: u64,
        got: u64,
    },

    #[error(transparent)]
    Rejected(#[from] RegistryError),
}

/// Proof of a committed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub tx_id: Uuid,
    pub caller: Address,
    pub nonce: u64,
    /// Operation name, e.g. `"schedule_audit"`.
    pub call: String,
    pub block_time: Timestamp,
    pub events: Vec<RegistryEvent>,
}

#[derive(Debug)]
pub struct Ledger {
    registry: HostRegistry,
    domain: TransactionDomain,
    nonces: HashMap<Address, u64>,
}

impl Ledger {
    pub fn new(registry: HostRegistry) -> Self {
        let domain = registry.config().transaction_domain();
        Self {
            registry,
            domain,
            nonces: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    pub fn domain(&self) -> &TransactionDomain {
        &self.domain
    }

    /// The nonce the next call from `account` must carry.
    pub fn next_nonce(&self, account: &Address) -> u64 {
        self.nonces.get(account).copied().unwrap_or(0)
    }

    pub fn apply(
        &mut self,
        signed: &SignedCall,
        block_time: Timestamp,
    ) -> Result<TransactionReceipt, LedgerError> {
        let caller = signed.verify(&self.domain)?;
        let expected = self.next_nonce(&caller);
        if signed.nonce != expected {
            return Err(LedgerError::NonceMismatch {
                signer: caller,
                expected,
                got: signed.nonce,
            });
        }

        let ctx = CallContext::new(caller, block_time);
        let events = self.registry.execute(&ctx, &signed.call)?;
        self.nonces.insert(caller, expected.saturating_add(1));

        let receipt = TransactionReceipt {
            tx_id: Uuid::new_v4(),
            caller,
            nonce: signed.nonce,
            call: signed.call.name().to_string(),
            block_time,
            events,
        };
        tracing::info!(
            tx_id = %receipt.tx_id,
            caller = %caller,
            nonce = receipt.nonce,
            call = %receipt.call,
            events = receipt.events.len(),
            "transaction committed"
        );
        Ok(receipt)
    }
}
