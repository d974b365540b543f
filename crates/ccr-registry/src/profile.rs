//! Compliance profiles: one per data controller, overwritten on every
//! registration and never deleted.

use ccr_core::{Address, Timestamp};
use ccr_fhe::{Ciphertext, Euint32, Euint8};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceProfile {
    pub data_points: Ciphertext<Euint32>,
    pub risk_score: Ciphertext<Euint8>,
    pub compliance_score: Ciphertext<Euint8>,
    pub has_personal_data: bool,
    pub has_financial_data: bool,
    pub has_health_data: bool,
    pub last_review_date: Timestamp,
    pub controller: Address,
}

/// Plaintext fields of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    pub has_personal_data: bool,
    pub has_financial_data: bool,
    pub has_health_data: bool,
    pub last_review_date: Timestamp,
    pub controller: Address,
}

/// Encrypted fields of a profile, as handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedScores {
    pub data_points: Ciphertext<Euint32>,
    pub risk_score: Ciphertext<Euint8>,
    pub compliance_score: Ciphertext<Euint8>,
}

impl ComplianceProfile {
    pub fn status(&self) -> ComplianceStatus {
        ComplianceStatus {
            has_personal_data: self.has_personal_data,
            has_financial_data: self.has_financial_data,
            has_health_data: self.has_health_data,
            last_review_date: self.last_review_date,
            controller: self.controller,
        }
    }

    pub fn encrypted_scores(&self) -> EncryptedScores {
        EncryptedScores {
            data_points: self.data_points,
            risk_score: self.risk_score,
            compliance_score: self.compliance_score,
        }
    }
}
