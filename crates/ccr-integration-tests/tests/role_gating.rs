//! # Role Gating Matrix
//!
//! Every role-gated call is attempted by every actor. A call succeeds
//! exactly when the actor holds the required role; otherwise it fails with
//! `Unauthorized` naming that role, and the registry is left untouched.

use std::sync::Arc;

use ccr_core::{ActivityId, Address, AuditId, ComplianceStandard, RiskLevel, Timestamp};
use ccr_fhe::MockFheEngine;
use ccr_registry::{
    AuditFindings, CallContext, ComplianceData, ComplianceRegistry, InMemoryRoleStore,
    ProcessingActivityData, RegistryCall, RegistryConfig, RegistryError, Role,
};

const OWNER: Address = Address([0x01; 20]);
const REGULATOR: Address = Address([0x02; 20]);
const AUDITOR: Address = Address([0xa1; 20]);
const AUDITOR_B: Address = Address([0xa2; 20]);
const CONTROLLER: Address = Address([0xc1; 20]);
const OUTSIDER: Address = Address([0xee; 20]);
const NEWCOMER: Address = Address([0x77; 20]);
const CONTRACT: Address = Address([0xcc; 20]);

const ACTORS: [Address; 5] = [OWNER, REGULATOR, AUDITOR, CONTROLLER, OUTSIDER];

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
    r.set_regulator(&ctx(OWNER), REGULATOR).unwrap();
    r.authorize_auditor(&ctx(REGULATOR), AUDITOR).unwrap();
    r.authorize_auditor(&ctx(REGULATOR), AUDITOR_B).unwrap();
    r.authorize_data_controller(&ctx(REGULATOR), CONTROLLER)
        .unwrap();
    r
}

fn gated_calls() -> Vec<(RegistryCall, Role)> {
    vec![
        (
            RegistryCall::SetRegulator {
                regulator: NEWCOMER,
            },
            Role::Owner,
        ),
        (
            RegistryCall::AuthorizeAuditor { auditor: NEWCOMER },
            Role::Regulator,
        ),
        (
            RegistryCall::RevokeAuditor { auditor: AUDITOR_B },
            Role::Regulator,
        ),
        (
            RegistryCall::AuthorizeDataController {
                controller: NEWCOMER,
            },
            Role::Regulator,
        ),
        (
            RegistryCall::RevokeDataController {
                controller: NEWCOMER,
            },
            Role::Regulator,
        ),
        (
            RegistryCall::RegisterComplianceData(ComplianceData {
                data_points: 10,
                risk_score: 10,
                compliance_score: 90,
                has_personal_data: false,
                has_financial_data: false,
                has_health_data: false,
            }),
            Role::DataController,
        ),
        (
            RegistryCall::RegisterProcessingActivity(ProcessingActivityData {
                activity_id: ActivityId([9; 32]),
                purpose: 1,
                data_subject_count: 10,
                retention_months: 6,
                has_consent: true,
                is_minimized: true,
                has_security_measures: true,
            }),
            Role::DataController,
        ),
        (
            RegistryCall::ScheduleAudit {
                auditee: CONTROLLER,
                standard: ComplianceStandard::Ccpa,
            },
            Role::Auditor,
        ),
        (
            RegistryCall::GrantCertification {
                entity: CONTROLLER,
                standard: ComplianceStandard::PciDss,
            },
            Role::Regulator,
        ),
        (
            RegistryCall::RevokeCertification {
                entity: CONTROLLER,
                standard: ComplianceStandard::PciDss,
            },
            Role::Regulator,
        ),
    ]
}

fn holds(actor: Address, role: Role) -> bool {
    match role {
        Role::Owner => actor == OWNER,
        Role::Regulator => actor == REGULATOR,
        Role::Auditor => actor == AUDITOR,
        Role::DataController => actor == CONTROLLER,
    }
}

#[test]
fn role_matrix_exhaustive() {
    for (call, required) in gated_calls() {
        for actor in ACTORS {
            let mut r = staffed();
            let events_before = r.events_since(0).len();
            let result = r.execute(&ctx(actor), &call);

            if holds(actor, required) {
                assert!(
                    result.is_ok(),
                    "{} by {actor} should succeed: {:?}",
                    call.name(),
                    result.err()
                );
                assert!(r.events_since(0).len() > events_before);
            } else {
                match result {
                    Err(RegistryError::Unauthorized { caller, required: r_required }) => {
                        assert_eq!(caller, actor);
                        assert_eq!(r_required, required, "{} by {actor}", call.name());
                    }
                    other => panic!("{} by {actor}: expected Unauthorized, got {other:?}", call.name()),
                }
                assert_eq!(r.events_since(0).len(), events_before);
            }
        }
    }
}

#[test]
fn owner_acts_as_regulator_until_one_is_appointed() {
    let mut r = ComplianceRegistry::new(
        RegistryConfig::new(CONTRACT),
        Arc::new(MockFheEngine::new()),
        InMemoryRoleStore::new(OWNER),
    );
    assert!(r.authorize_auditor(&ctx(OWNER), AUDITOR).is_ok());

    r.set_regulator(&ctx(OWNER), REGULATOR).unwrap();
    assert!(matches!(
        r.authorize_auditor(&ctx(OWNER), AUDITOR_B),
        Err(RegistryError::Unauthorized {
            required: Role::Regulator,
            ..
        })
    ));
    assert_eq!(r.roles_of(OWNER), vec![Role::Owner]);
    assert_eq!(r.roles_of(REGULATOR), vec![Role::Regulator]);
}

#[test]
fn zero_address_grants_rejected() {
    let mut r = staffed();
    assert!(matches!(
        r.set_regulator(&ctx(OWNER), Address::ZERO),
        Err(RegistryError::ZeroAddress(Role::Regulator))
    ));
    assert!(matches!(
        r.authorize_auditor(&ctx(REGULATOR), Address::ZERO),
        Err(RegistryError::ZeroAddress(Role::Auditor))
    ));
    assert!(matches!(
        r.authorize_data_controller(&ctx(REGULATOR), Address::ZERO),
        Err(RegistryError::ZeroAddress(Role::DataController))
    ));
    assert_eq!(r.regulator(), REGULATOR);
}

#[test]
fn revoked_controller_loses_write_access_but_keeps_records() {
    let mut r = staffed();
    let data = ComplianceData {
        data_points: 1,
        risk_score: 1,
        compliance_score: 1,
        has_personal_data: true,
        has_financial_data: false,
        has_health_data: false,
    };
    r.register_compliance_data(&ctx(CONTROLLER), &data).unwrap();
    r.grant_certification(&ctx(REGULATOR), CONTROLLER, ComplianceStandard::Gdpr)
        .unwrap();
    r.revoke_data_controller(&ctx(REGULATOR), CONTROLLER)
        .unwrap();

    assert!(!r.is_data_controller(&CONTROLLER));
    assert!(matches!(
        r.register_compliance_data(&ctx(CONTROLLER), &data),
        Err(RegistryError::Unauthorized {
            required: Role::DataController,
            ..
        })
    ));
    assert!(r.compliance_status(&CONTROLLER).is_some());
    assert!(r.has_certification(&CONTROLLER, ComplianceStandard::Gdpr));
    assert!(matches!(
        r.schedule_audit(&ctx(AUDITOR), CONTROLLER, ComplianceStandard::Gdpr),
        Err(RegistryError::NotDataController(CONTROLLER))
    ));
}

#[test]
fn only_recorded_auditor_may_advance_an_audit() {
    let mut r = staffed();
    let id = r
        .schedule_audit(&ctx(AUDITOR), CONTROLLER, ComplianceStandard::Gdpr)
        .unwrap()
        .value;
    let findings = AuditFindings {
        findings_count: 1,
        risk_level: RiskLevel::Low,
        penalty_amount: 0,
        remediated: true,
    };

    for actor in [OWNER, REGULATOR, AUDITOR_B, CONTROLLER, OUTSIDER] {
        assert!(
            matches!(
                r.start_audit(&ctx(actor), id),
                Err(RegistryError::NotAuditOwner { audit_id, caller }) if audit_id == id && caller == actor
            ),
            "start by {actor}"
        );
        assert!(
            matches!(
                r.complete_audit(&ctx(actor), id, &findings),
                Err(RegistryError::NotAuditOwner { .. })
            ),
            "complete by {actor}"
        );
    }
    assert!(r.audit(id).unwrap().status.is_open());
}

#[test]
fn revoked_auditor_can_finish_own_audit_but_not_schedule() {
    let mut r = staffed();
    let id = r
        .schedule_audit(&ctx(AUDITOR), CONTROLLER, ComplianceStandard::Sox)
        .unwrap()
        .value;
    r.revoke_auditor(&ctx(REGULATOR), AUDITOR).unwrap();

    assert!(r
        .schedule_audit(&ctx(AUDITOR), CONTROLLER, ComplianceStandard::Sox)
        .is_err());
    r.start_audit(&ctx(AUDITOR), id).unwrap();
    r.complete_audit(
        &ctx(AUDITOR),
        id,
        &AuditFindings {
            findings_count: 0,
            risk_level: RiskLevel::Low,
            penalty_amount: 0,
            remediated: true,
        },
    )
    .unwrap();
    assert_eq!(r.total_audits(), 1);
    assert!(matches!(
        r.audit(AuditId(2)),
        Err(RegistryError::UnknownAudit(AuditId(2)))
    ));
}
