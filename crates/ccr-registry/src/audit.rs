//! # Audit Lifecycle
//!
//! ```text
//! SCHEDULED ──▶ IN_PROGRESS ──▶ COMPLETED (terminal)
//!     │                            ▲
//!     └────────────────────────────┘
//! ```
//!
//! Scheduling creates the record. `start` is optional; completion is
//! accepted from either open state. Nothing leaves COMPLETED: there is no
//! cancel, re-open or failure path.
//!
//! Only the auditor recorded at scheduling may start or complete an audit.
//! That check is against the record, not current role membership.

use ccr_core::{Address, AuditId, ComplianceStandard, RiskLevel, Timestamp};
use ccr_fhe::{Ciphertext, Euint32, Euint64};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl AuditStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Scheduled | Self::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTransition {
    pub from: AuditStatus,
    pub to: AuditStatus,
    pub at: Timestamp,
}

/// Values an auditor submits on completion, already encrypted.
#[derive(Debug, Clone, Copy)]
pub struct AuditOutcome {
    pub findings_count: Ciphertext<Euint32>,
    pub penalty_amount: Ciphertext<Euint64>,
    pub overall_risk: RiskLevel,
    pub remediated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: AuditId,
    pub standard: ComplianceStandard,
    pub status: AuditStatus,
    /// Encrypted zero until completion.
    pub findings_count: Ciphertext<Euint32>,
    /// `None` until completion.
    pub overall_risk: Option<RiskLevel>,
    pub auditor: Address,
    pub auditee: Address,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub remediated: bool,
    /// Encrypted zero until completion.
    pub penalty_amount: Ciphertext<Euint64>,
    pub transitions: Vec<AuditTransition>,
}

impl AuditRecord {
    pub fn scheduled(
        id: AuditId,
        standard: ComplianceStandard,
        auditor: Address,
        auditee: Address,
        zero_findings: Ciphertext<Euint32>,
        zero_penalty: Ciphertext<Euint64>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            standard,
            status: AuditStatus::Scheduled,
            findings_count: zero_findings,
            overall_risk: None,
            auditor,
            auditee,
            start_time: now,
            end_time: None,
            remediated: false,
            penalty_amount: zero_penalty,
            transitions: Vec::new(),
        }
    }

    /// Fails unless `caller` is the recorded auditor.
    pub fn require_auditor(&self, caller: Address) -> Result<(), RegistryError> {
        if self.auditor == caller {
            Ok(())
        } else {
            Err(RegistryError::NotAuditOwner {
                audit_id: self.id,
                caller,
            })
        }
    }

    /// Check that `to` is reachable from the current status.
    pub fn check_transition(&self, to: AuditStatus) -> Result<(), RegistryError> {
        let allowed = match to {
            AuditStatus::InProgress => self.status == AuditStatus::Scheduled,
            AuditStatus::Completed => self.status.is_open(),
            AuditStatus::Scheduled => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(RegistryError::InvalidTransition {
                audit_id: self.id,
                from: self.status,
                to,
            })
        }
    }

    /// SCHEDULED → IN_PROGRESS.
    pub fn start(&mut self, now: Timestamp) -> Result<(), RegistryError> {
        self.check_transition(AuditStatus::InProgress)?;
        self.do_transition(AuditStatus::InProgress, now);
        Ok(())
    }

    /// SCHEDULED | IN_PROGRESS → COMPLETED.
    pub fn complete(&mut self, outcome: AuditOutcome, now: Timestamp) -> Result<(), RegistryError> {
        self.check_transition(AuditStatus::Completed)?;
        self.findings_count = outcome.findings_count;
        self.penalty_amount = outcome.penalty_amount;
        self.overall_risk = Some(outcome.overall_risk);
        self.remediated = outcome.remediated;
        self.end_time = Some(now);
        self.do_transition(AuditStatus::Completed, now);
        Ok(())
    }

    fn do_transition(&mut self, to: AuditStatus, at: Timestamp) {
        self.transitions.push(AuditTransition {
            from: self.status,
            to,
            at,
        });
        self.status = to;
    }
}

/// Plaintext fields of an audit, safe to serve to any caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub id: AuditId,
    pub standard: ComplianceStandard,
    pub status: AuditStatus,
    pub overall_risk: Option<RiskLevel>,
    pub auditor: Address,
    pub auditee: Address,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub remediated: bool,
}

impl From<&AuditRecord> for AuditSummary {
    fn from(r: &AuditRecord) -> Self {
        Self {
            id: r.id,
            standard: r.standard,
            status: r.status,
            overall_risk: r.overall_risk,
            auditor: r.auditor,
            auditee: r.auditee,
            start_time: r.start_time,
            end_time: r.end_time,
            remediated: r.remediated,
        }
    }
}

/// Encrypted results of an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedAuditResults {
    pub findings_count: Ciphertext<Euint32>,
    pub penalty_amount: Ciphertext<Euint64>,
}
