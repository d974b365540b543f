//! # Registry Events
//!
//! Events are the only observable output of a committed call besides its
//! return value. They never carry plaintext from an encrypted field: score
//! updates announce that a score changed, not what it changed to.

use ccr_core::{ActivityId, Address, AuditId, ComplianceStandard, RiskLevel, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    RegulatorUpdated {
        previous: Address,
        regulator: Address,
    },
    AuditorAuthorized {
        auditor: Address,
    },
    AuditorRevoked {
        auditor: Address,
    },
    DataControllerAuthorized {
        controller: Address,
    },
    DataControllerRevoked {
        controller: Address,
    },
    ComplianceDataUpdated {
        entity: Address,
        timestamp: Timestamp,
    },
    ProcessingActivityRegistered {
        activity_id: ActivityId,
        controller: Address,
        timestamp: Timestamp,
    },
    AuditScheduled {
        audit_id: AuditId,
        auditee: Address,
        standard: ComplianceStandard,
    },
    AuditStarted {
        audit_id: AuditId,
        auditor: Address,
    },
    ComplianceScoreUpdated {
        entity: Address,
        timestamp: Timestamp,
    },
    ViolationDetected {
        entity: Address,
        audit_id: AuditId,
        risk_level: RiskLevel,
    },
    AuditCompleted {
        audit_id: AuditId,
        risk_level: RiskLevel,
        remediated: bool,
    },
    CertificationGranted {
        entity: Address,
        standard: ComplianceStandard,
    },
    CertificationRevoked {
        entity: Address,
        standard: ComplianceStandard,
    },
}

impl RegistryEvent {
    /// The snake_case event name, matching the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegulatorUpdated { .. } => "regulator_updated",
            Self::AuditorAuthorized { .. } => "auditor_authorized",
            Self::AuditorRevoked { .. } => "auditor_revoked",
            Self::DataControllerAuthorized { .. } => "data_controller_authorized",
            Self::DataControllerRevoked { .. } => "data_controller_revoked",
            Self::ComplianceDataUpdated { .. } => "compliance_data_updated",
            Self::ProcessingActivityRegistered { .. } => "processing_activity_registered",
            Self::AuditScheduled { .. } => "audit_scheduled",
            Self::AuditStarted { .. } => "audit_started",
            Self::ComplianceScoreUpdated { .. } => "compliance_score_updated",
            Self::ViolationDetected { .. } => "violation_detected",
            Self::AuditCompleted { .. } => "audit_completed",
            Self::CertificationGranted { .. } => "certification_granted",
            Self::CertificationRevoked { .. } => "certification_revoked",
        }
    }
}

/// An event as stored in the registry's append-only log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    pub block_time: Timestamp,
    #[serde(flatten)]
    pub event: RegistryEvent,
}
