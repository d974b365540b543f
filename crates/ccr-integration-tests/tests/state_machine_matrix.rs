//! # Audit State Machine Transition Matrix
//!
//! SCHEDULED → IN_PROGRESS → COMPLETED, with SCHEDULED → COMPLETED as a
//! shortcut. COMPLETED is terminal. Every (from, to) pair is exercised
//! both on the record type and through the registry.

use std::sync::Arc;

use ccr_core::{Address, AuditId, ComplianceStandard, RiskLevel, Timestamp};
use ccr_fhe::{Ciphertext, Handle, MockFheEngine};
use ccr_registry::audit::AuditOutcome;
use ccr_registry::{
    AuditFindings, AuditRecord, AuditStatus, CallContext, ComplianceRegistry, InMemoryRoleStore,
    RegistryConfig, RegistryError,
};

const OWNER: Address = Address([0x01; 20]);
const AUDITOR: Address = Address([0xa1; 20]);
const CONTROLLER: Address = Address([0xc1; 20]);
const CONTRACT: Address = Address([0xcc; 20]);

const STATES: [AuditStatus; 3] = [
    AuditStatus::Scheduled,
    AuditStatus::InProgress,
    AuditStatus::Completed,
];

fn at(secs: i64) -> Timestamp {
    Timestamp::from_epoch_secs(1_767_225_600 + secs).unwrap()
}

fn ctx(caller: Address) -> CallContext {
    CallContext::new(caller, at(0))
}

fn findings() -> AuditFindings {
    AuditFindings {
        findings_count: 2,
        risk_level: RiskLevel::Low,
        penalty_amount: 100,
        remediated: true,
    }
}

/// A record driven into `status` through valid transitions.
fn record_in(status: AuditStatus) -> AuditRecord {
    let mut record = AuditRecord::scheduled(
        AuditId(1),
        ComplianceStandard::Gdpr,
        AUDITOR,
        CONTROLLER,
        Ciphertext::from_handle(Handle([0; 32])),
        Ciphertext::from_handle(Handle([1; 32])),
        at(0),
    );
    match status {
        AuditStatus::Scheduled => {}
        AuditStatus::InProgress => record.start(at(1)).unwrap(),
        AuditStatus::Completed => record
            .complete(
                AuditOutcome {
                    findings_count: Ciphertext::from_handle(Handle([2; 32])),
                    penalty_amount: Ciphertext::from_handle(Handle([3; 32])),
                    overall_risk: RiskLevel::Low,
                    remediated: true,
                },
                at(1),
            )
            .unwrap(),
    }
    record
}

#[test]
fn audit_transition_matrix_exhaustive() {
    let expected_valid = [
        (AuditStatus::Scheduled, AuditStatus::InProgress),
        (AuditStatus::Scheduled, AuditStatus::Completed),
        (AuditStatus::InProgress, AuditStatus::Completed),
    ];

    for from in STATES {
        for to in STATES {
            let record = record_in(from);
            let actual_valid = record.check_transition(to).is_ok();
            let expected = expected_valid.contains(&(from, to));
            assert_eq!(
                actual_valid, expected,
                "Audit transition {from} → {to}: expected valid={expected}, got valid={actual_valid}"
            );
            if !actual_valid {
                assert!(matches!(
                    record.check_transition(to),
                    Err(RegistryError::InvalidTransition { from: f, to: t, .. }) if f == from && t == to
                ));
            }
        }
    }
}

#[test]
fn completed_is_the_only_terminal_state() {
    assert!(AuditStatus::Scheduled.is_open());
    assert!(AuditStatus::InProgress.is_open());
    assert!(!AuditStatus::Completed.is_open());
}

#[test]
fn status_names_are_screaming_snake_case() {
    for state in STATES {
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json, serde_json::json!(state.as_str()));
    }
    assert_eq!(AuditStatus::InProgress.as_str(), "IN_PROGRESS");
}

// =========================================================================
// Through the registry
// =========================================================================

fn registry_with_audit() -> (ComplianceRegistry<MockFheEngine, InMemoryRoleStore>, AuditId) {
    let mut r = ComplianceRegistry::new(
        RegistryConfig::new(CONTRACT),
        Arc::new(MockFheEngine::new()),
        InMemoryRoleStore::new(OWNER),
    );
    r.authorize_auditor(&ctx(OWNER), AUDITOR).unwrap();
    r.authorize_data_controller(&ctx(OWNER), CONTROLLER).unwrap();
    let id = r
        .schedule_audit(&ctx(AUDITOR), CONTROLLER, ComplianceStandard::Gdpr)
        .unwrap()
        .value;
    (r, id)
}

#[test]
fn start_then_complete_sets_end_time() {
    let (mut r, id) = registry_with_audit();
    r.start_audit(&CallContext::new(AUDITOR, at(10)), id).unwrap();
    r.complete_audit(&CallContext::new(AUDITOR, at(20)), id, &findings())
        .unwrap();

    let summary = r.audit(id).unwrap();
    assert_eq!(summary.status, AuditStatus::Completed);
    assert_eq!(summary.end_time, Some(at(20)));
    assert!(summary.remediated);
}

#[test]
fn scheduled_audit_can_complete_directly() {
    let (mut r, id) = registry_with_audit();
    r.complete_audit(&ctx(AUDITOR), id, &findings()).unwrap();
    assert_eq!(r.audit(id).unwrap().status, AuditStatus::Completed);
}

#[test]
fn in_progress_audit_cannot_restart() {
    let (mut r, id) = registry_with_audit();
    r.start_audit(&ctx(AUDITOR), id).unwrap();
    assert!(matches!(
        r.start_audit(&ctx(AUDITOR), id),
        Err(RegistryError::InvalidTransition {
            from: AuditStatus::InProgress,
            to: AuditStatus::InProgress,
            ..
        })
    ));
}

#[test]
fn completed_audit_rejects_every_transition() {
    let (mut r, id) = registry_with_audit();
    r.complete_audit(&ctx(AUDITOR), id, &findings()).unwrap();
    let events_before = r.events_since(0).len();

    assert!(matches!(
        r.start_audit(&ctx(AUDITOR), id),
        Err(RegistryError::InvalidTransition {
            from: AuditStatus::Completed,
            ..
        })
    ));
    assert!(matches!(
        r.complete_audit(&ctx(AUDITOR), id, &findings()),
        Err(RegistryError::InvalidTransition {
            from: AuditStatus::Completed,
            ..
        })
    ));
    assert_eq!(r.events_since(0).len(), events_before);
}

#[test]
fn unknown_ids_rejected_before_transition() {
    let (mut r, _) = registry_with_audit();
    for id in [AuditId(0), AuditId(2), AuditId(u64::MAX)] {
        assert!(matches!(
            r.start_audit(&ctx(AUDITOR), id),
            Err(RegistryError::UnknownAudit(got)) if got == id
        ));
        assert!(matches!(
            r.complete_audit(&ctx(AUDITOR), id, &findings()),
            Err(RegistryError::UnknownAudit(_))
        ));
        assert!(r.encrypted_audit_results(id).is_err());
    }
}
