//! Plaintext call arguments for the operations that encrypt.
//!
//! These values exist only between the caller and the registry boundary.
//! The registry encrypts them before storing anything, and they are never
//! logged or emitted.

use ccr_core::{ActivityId, RiskLevel};
use serde::{Deserialize, Serialize};

/// Upper bound for `risk_score` and `compliance_score`.
pub const MAX_SCORE: u8 = 100;

/// Upper bound for `retention_months`.
pub const MAX_RETENTION_MONTHS: u16 = 120;

/// Arguments to `register_compliance_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceData {
    pub data_points: u32,
    pub risk_score: u8,
    pub compliance_score: u8,
    pub has_personal_data: bool,
    pub has_financial_data: bool,
    pub has_health_data: bool,
}

/// Arguments to `register_processing_activity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingActivityData {
    pub activity_id: ActivityId,
    pub purpose: u8,
    pub data_subject_count: u32,
    pub retention_months: u16,
    pub has_consent: bool,
    pub is_minimized: bool,
    pub has_security_measures: bool,
}

/// Arguments to `complete_audit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFindings {
    pub findings_count: u32,
    pub risk_level: RiskLevel,
    pub penalty_amount: u64,
    pub remediated: bool,
}
