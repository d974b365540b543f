//! # ccr-registry — Confidential Compliance Registry
//!
//! A role-gated registry of compliance state for data controllers. Sensitive
//! numbers (scores, counts, penalties, retention periods) are stored only as
//! ciphertext handles minted by an [`ccr_fhe::FheEngine`]; the registry
//! itself never holds or reveals their plaintexts.
//!
//! ## Crate Layout
//!
//! - [`roles`]: owner, regulator, auditor and data controller membership.
//! - [`registry`]: [`ComplianceRegistry`], every mutating operation and view.
//! - [`audit`]: the audit record and its SCHEDULED → IN_PROGRESS → COMPLETED
//!   lifecycle.
//! - [`scoring`]: the penalty applied to an auditee's score on completion.
//! - [`transaction`]: signed calls, the wire form hosts accept.
//! - [`config`]: YAML configuration.

pub mod activity;
pub mod audit;
pub mod certification;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod inputs;
pub mod profile;
pub mod registry;
pub mod roles;
pub mod scoring;
pub mod transaction;

pub use activity::DataProcessingActivity;
pub use audit::{AuditRecord, AuditStatus, AuditSummary, AuditTransition, EncryptedAuditResults};
pub use certification::CertificationBook;
pub use config::{ConfigError, RegistryConfig};
pub use context::CallContext;
pub use error::RegistryError;
pub use events::{EventRecord, RegistryEvent};
pub use inputs::{
    AuditFindings, ComplianceData, ProcessingActivityData, MAX_RETENTION_MONTHS, MAX_SCORE,
};
pub use profile::{ComplianceProfile, ComplianceStatus, EncryptedScores};
pub use registry::{Committed, ComplianceRegistry};
pub use roles::{AuthContext, InMemoryRoleStore, Role, RoleStore};
pub use scoring::{RiskMultipliers, VIOLATION_THRESHOLD};
pub use transaction::{RegistryCall, SignedCall, TransactionDomain};
