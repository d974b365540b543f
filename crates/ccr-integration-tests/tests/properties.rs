//! Property-based tests using proptest.
//!
//! These tests verify registry invariants that should hold for any input:
//! rejected calls leave no trace, audit ids are dense and increasing,
//! certifications are independent per standard, and the encrypted score
//! arithmetic wraps at eight bits.

use std::sync::Arc;

use proptest::prelude::*;

use ccr_core::{Address, AuditId, ComplianceStandard, RiskLevel, Timestamp};
use ccr_fhe::{ClearValue, DecryptionBackend, MockFheEngine};
use ccr_registry::{
    AuditFindings, CallContext, ComplianceData, ComplianceRegistry, InMemoryRoleStore,
    RegistryConfig, RegistryError, RegistryEvent, RiskMultipliers,
};

const OWNER: Address = Address([0x01; 20]);
const AUDITOR: Address = Address([0xa1; 20]);
const CONTROLLER: Address = Address([0xc1; 20]);
const CONTRACT: Address = Address([0xcc; 20]);

type Registry = ComplianceRegistry<MockFheEngine, InMemoryRoleStore>;

fn ctx(caller: Address) -> CallContext {
    CallContext::new(caller, Timestamp::from_epoch_secs(1_767_225_600).unwrap())
}

fn staffed() -> Registry {
    let mut r = ComplianceRegistry::new(
        RegistryConfig::new(CONTRACT),
        Arc::new(MockFheEngine::new()),
        InMemoryRoleStore::new(OWNER),
    );
    r.authorize_auditor(&ctx(OWNER), AUDITOR).unwrap();
    r.authorize_data_controller(&ctx(OWNER), CONTROLLER).unwrap();
    r
}

// ============================================================================
// Custom Strategies
// ============================================================================

fn arb_risk() -> impl Strategy<Value = RiskLevel> {
    prop::sample::select(RiskLevel::all())
}

fn arb_standard() -> impl Strategy<Value = ComplianceStandard> {
    prop::sample::select(ComplianceStandard::all())
}

fn arb_valid_data() -> impl Strategy<Value = ComplianceData> {
    (any::<u32>(), 0u8..=100, 0u8..=100, any::<[bool; 3]>()).prop_map(
        |(data_points, risk_score, compliance_score, [personal, financial, health])| {
            ComplianceData {
                data_points,
                risk_score,
                compliance_score,
                has_personal_data: personal,
                has_financial_data: financial,
                has_health_data: health,
            }
        },
    )
}

proptest! {
    /// Any score above the maximum is rejected and nothing is recorded.
    #[test]
    fn out_of_range_score_leaves_no_trace(
        mut data in arb_valid_data(),
        bad in 101u8..=255,
        which in any::<bool>(),
    ) {
        if which {
            data.compliance_score = bad;
        } else {
            data.risk_score = bad;
        }
        let mut r = staffed();
        let events_before = r.events_since(0).len();
        let ciphertexts_before = r.engine().ciphertext_count();

        let result = r.register_compliance_data(&ctx(CONTROLLER), &data);
        let is_score_error = matches!(result, Err(RegistryError::ScoreOutOfRange { value, max: 100, .. }) if value == bad);
        prop_assert!(is_score_error);
        prop_assert!(r.compliance_status(&CONTROLLER).is_none());
        prop_assert_eq!(r.events_since(0).len(), events_before);
        prop_assert_eq!(r.engine().ciphertext_count(), ciphertexts_before);
    }

    /// In-range data always registers and round-trips through the engine.
    #[test]
    fn valid_data_always_registers(data in arb_valid_data()) {
        let mut r = staffed();
        prop_assert!(r.register_compliance_data(&ctx(CONTROLLER), &data).is_ok());
        let scores = r.encrypted_compliance_scores(&CONTROLLER).unwrap();
        let revealed = r.engine().reveal(scores.compliance_score.handle()).unwrap();
        prop_assert_eq!(
            ClearValue::from_revealed(&revealed).unwrap(),
            ClearValue::Euint8(data.compliance_score)
        );
    }

    /// Audit ids run 1..=n with no gaps, in scheduling order.
    #[test]
    fn audit_ids_strictly_increase(standards in prop::collection::vec(arb_standard(), 1..20)) {
        let mut r = staffed();
        let ids: Vec<AuditId> = standards
            .iter()
            .map(|s| r.schedule_audit(&ctx(AUDITOR), CONTROLLER, *s).unwrap().value)
            .collect();
        for (i, id) in ids.iter().enumerate() {
            prop_assert_eq!(id.value(), i as u64 + 1);
            prop_assert_eq!(r.audit(*id).unwrap().standard, standards[i]);
        }
        prop_assert_eq!(r.total_audits(), standards.len() as u64);
    }

    /// Granting or revoking one standard never changes another.
    #[test]
    fn certifications_independent(
        granted in prop::collection::btree_set(arb_standard(), 0..6),
        revoked in arb_standard(),
    ) {
        let mut r = staffed();
        for s in &granted {
            r.grant_certification(&ctx(OWNER), CONTROLLER, *s).unwrap();
        }
        for s in ComplianceStandard::all() {
            prop_assert_eq!(r.has_certification(&CONTROLLER, *s), granted.contains(s));
        }

        r.revoke_certification(&ctx(OWNER), CONTROLLER, revoked).unwrap();
        for s in ComplianceStandard::all() {
            let expected = granted.contains(s) && *s != revoked;
            prop_assert_eq!(r.has_certification(&CONTROLLER, *s), expected);
        }
    }

    /// The penalized score is `score - min(findings * multiplier, 255)` mod 256.
    #[test]
    fn penalized_score_wraps(score in 0u8..=100, findings in 0u32..1000, risk in arb_risk()) {
        let mut r = staffed();
        let data = ComplianceData {
            data_points: 1,
            risk_score: 0,
            compliance_score: score,
            has_personal_data: false,
            has_financial_data: false,
            has_health_data: false,
        };
        r.register_compliance_data(&ctx(CONTROLLER), &data).unwrap();
        let id = r
            .schedule_audit(&ctx(AUDITOR), CONTROLLER, ComplianceStandard::Gdpr)
            .unwrap()
            .value;
        let committed = r
            .complete_audit(
                &ctx(AUDITOR),
                id,
                &AuditFindings {
                    findings_count: findings,
                    risk_level: risk,
                    penalty_amount: 0,
                    remediated: false,
                },
            )
            .unwrap();

        let reduction = RiskMultipliers::default().score_reduction(findings, risk);
        let expected = score.wrapping_sub(reduction);
        let handle = r.encrypted_compliance_scores(&CONTROLLER).unwrap().compliance_score.handle();
        let revealed = r.engine().reveal(handle).unwrap();
        prop_assert_eq!(ClearValue::from_revealed(&revealed).unwrap(), ClearValue::Euint8(expected));

        let flagged = committed
            .events
            .iter()
            .any(|e| matches!(e, RegistryEvent::ViolationDetected { .. }));
        prop_assert_eq!(flagged, risk >= RiskLevel::Medium);
        let last_is_audit_completed =
            matches!(committed.events.last(), Some(RegistryEvent::AuditCompleted { .. }));
        prop_assert!(last_is_audit_completed);
    }
}
