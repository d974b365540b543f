//! # Compliance Score Penalty
//!
//! On audit completion the auditee's encrypted compliance score is reduced
//! by `findings × multiplier(risk)`. The reduction is computed in plaintext
//! (both inputs are plaintext at completion time), encrypted as `euint8`,
//! and subtracted homomorphically. The engine never sees the current score
//! and the registry never sees the result.
//!
//! The reduction saturates at 255 before encryption. The subtraction itself
//! wraps: a score of 85 reduced by 100 becomes 241, not 0.

use ccr_core::RiskLevel;

/// Lowest risk level at which a completed audit emits `ViolationDetected`.
pub const VIOLATION_THRESHOLD: RiskLevel = RiskLevel::Medium;

/// Per-risk-level penalty multipliers. The registry applies the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskMultipliers {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl Default for RiskMultipliers {
    fn default() -> Self {
        Self {
            low: 2,
            medium: 5,
            high: 10,
            critical: 20,
        }
    }
}

impl RiskMultipliers {
    pub fn for_risk(&self, risk: RiskLevel) -> u32 {
        match risk {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    /// `findings × multiplier(risk)`, saturated to `u8`.
    pub fn score_reduction(&self, findings: u32, risk: RiskLevel) -> u8 {
        let raw = u64::from(findings) * u64::from(self.for_risk(risk));
        u8::try_from(raw).unwrap_or(u8::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_multipliers() {
        let m = RiskMultipliers::default();
        assert_eq!(m.for_risk(RiskLevel::Low), 2);
        assert_eq!(m.for_risk(RiskLevel::Medium), 5);
        assert_eq!(m.for_risk(RiskLevel::High), 10);
        assert_eq!(m.for_risk(RiskLevel::Critical), 20);
    }

    #[test]
    fn high_risk_eight_findings() {
        assert_eq!(RiskMultipliers::default().score_reduction(8, RiskLevel::High), 80);
    }

    #[test]
    fn zero_findings_no_reduction() {
        for risk in RiskLevel::all() {
            assert_eq!(RiskMultipliers::default().score_reduction(0, *risk), 0);
        }
    }

    #[test]
    fn reduction_saturates() {
        let m = RiskMultipliers::default();
        assert_eq!(m.score_reduction(13, RiskLevel::Critical), 255);
        assert_eq!(m.score_reduction(u32::MAX, RiskLevel::Critical), 255);
    }

    #[test]
    fn violation_threshold_is_medium() {
        let flagged: Vec<RiskLevel> = RiskLevel::all()
            .iter()
            .copied()
            .filter(|r| *r >= VIOLATION_THRESHOLD)
            .collect();
        assert_eq!(
            flagged,
            vec![RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical]
        );
    }
}
