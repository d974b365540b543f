//! # Registry Errors
//!
//! Every rejected call maps to exactly one variant. Rejection is total: the
//! registry validates and encrypts before its first write, so no variant is
//! ever returned after storage has changed.
//!
//! The variants fall into four classes a host can map to status codes:
//! authorization ([`RegistryError::Unauthorized`],
//! [`RegistryError::NotAuditOwner`]), validation (`*OutOfRange`,
//! [`RegistryError::ZeroAddress`]), reference ([`RegistryError::UnknownAudit`],
//! [`RegistryError::NotDataController`], [`RegistryError::InvalidTransition`]),
//! and collaborator failure ([`RegistryError::Encryption`]).

use ccr_core::{Address, AuditId, CanonicalizationError};
use ccr_fhe::FheError;
use thiserror::Error;

use crate::audit::AuditStatus;
use crate::roles::Role;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// The caller does not hold the role the operation requires.
    #[error("{caller} lacks required role {required}")]
    Unauthorized { caller: Address, required: Role },

    /// The caller is an auditor, but not the one recorded on this audit.
    #[error("{caller} is not the auditor of {audit_id}")]
    NotAuditOwner { audit_id: AuditId, caller: Address },

    #[error("{field} {value} exceeds maximum {max}")]
    ScoreOutOfRange {
        field: &'static str,
        value: u8,
        max: u8,
    },

    #[error("retention period {value} months exceeds maximum {max}")]
    RetentionOutOfRange { value: u16, max: u16 },

    /// A role grant or regulator change named the zero address.
    #[error("zero address is not a valid {0}")]
    ZeroAddress(Role),

    /// The target of the call is not a registered data controller.
    #[error("{0} is not a registered data controller")]
    NotDataController(Address),

    #[error("unknown audit {0}")]
    UnknownAudit(AuditId),

    #[error("invalid transition for {audit_id}: {from} -> {to}")]
    InvalidTransition {
        audit_id: AuditId,
        from: AuditStatus,
        to: AuditStatus,
    },

    /// The audit id counter reached `u64::MAX`.
    #[error("audit id space exhausted")]
    AuditIdsExhausted,

    /// A signed call failed verification.
    #[error("invalid call signature: {0}")]
    InvalidSignature(String),

    #[error("encryption collaborator failed: {0}")]
    Encryption(#[from] FheError),

    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
