//! # Compliance Standards and Risk Levels
//!
//! The two closed vocabularies of the registry. `ComplianceStandard` names
//! the regulatory framework an audit or certification refers to;
//! `RiskLevel` is the plaintext outcome an auditor records on completion.
//!
//! Both enums carry a stable numeric index (their declaration order) used by
//! clients that address standards positionally, and a snake_case string
//! form used on the wire.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CcrError;

/// Regulatory frameworks an entity can be audited or certified against.
///
/// | # | Standard | Scope |
/// |---|----------|-------|
/// | 0 | GDPR | EU personal data |
/// | 1 | CCPA | California consumer privacy |
/// | 2 | HIPAA | US health information |
/// | 3 | SOX | Financial reporting controls |
/// | 4 | PCI_DSS | Payment card data |
/// | 5 | ISO27001 | Information security management |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStandard {
    Gdpr,
    Ccpa,
    Hipaa,
    Sox,
    PciDss,
    Iso27001,
}

/// Number of compliance standards.
pub const COMPLIANCE_STANDARD_COUNT: usize = 6;

impl ComplianceStandard {
    /// All standards in index order.
    pub fn all() -> &'static [ComplianceStandard] {
        &[
            Self::Gdpr,
            Self::Ccpa,
            Self::Hipaa,
            Self::Sox,
            Self::PciDss,
            Self::Iso27001,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gdpr => "gdpr",
            Self::Ccpa => "ccpa",
            Self::Hipaa => "hipaa",
            Self::Sox => "sox",
            Self::PciDss => "pci_dss",
            Self::Iso27001 => "iso27001",
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Self::Gdpr => 0,
            Self::Ccpa => 1,
            Self::Hipaa => 2,
            Self::Sox => 3,
            Self::PciDss => 4,
            Self::Iso27001 => 5,
        }
    }

    pub fn from_index(index: u8) -> Result<Self, CcrError> {
        Self::all()
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| CcrError::Validation(format!("unknown compliance standard index: {index}")))
    }
}

impl std::fmt::Display for ComplianceStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceStandard {
    type Err = CcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gdpr" => Ok(Self::Gdpr),
            "ccpa" => Ok(Self::Ccpa),
            "hipaa" => Ok(Self::Hipaa),
            "sox" => Ok(Self::Sox),
            "pci_dss" => Ok(Self::PciDss),
            "iso27001" => Ok(Self::Iso27001),
            other => Err(CcrError::Validation(format!(
                "unknown compliance standard: {other:?}"
            ))),
        }
    }
}

/// Overall risk recorded on audit completion. Ordered `Low < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn all() -> &'static [RiskLevel] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    pub fn from_index(index: u8) -> Result<Self, CcrError> {
        Self::all()
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| CcrError::Validation(format!("unknown risk level index: {index}")))
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(CcrError::Validation(format!("unknown risk level: {other:?}"))),
        }
    }
}
