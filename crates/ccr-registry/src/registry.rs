//! # Compliance Registry
//!
//! Owns all registry state: compliance profiles, processing activities,
//! audit records, certifications, the audit id counter and the event log.
//! Role membership lives in the injected [`RoleStore`]; ciphertexts live in
//! the injected [`FheEngine`].
//!
//! ## Security Invariant
//!
//! Every mutating operation runs in three phases:
//!
//! 1. authorize the caller and validate every argument,
//! 2. encrypt new values and extend their ACLs,
//! 3. write registry state and append events.
//!
//! Phases 1 and 2 never touch registry state, so a rejected call leaves it
//! exactly as it was. Phase 3 cannot fail. Ciphertexts created in phase 2
//! by a call that later fails are unreferenced and harmless.
//!
//! The registry never decrypts. It holds `E: FheEngine`, which has no
//! reveal operation, and its events carry no encrypted-field plaintext.

use std::collections::BTreeMap;
use std::sync::Arc;

use ccr_core::{ActivityId, Address, AuditId, ComplianceStandard, RiskLevel, Timestamp};
use ccr_fhe::{Ciphertext, EncryptedType, Euint16, Euint32, Euint64, Euint8, FheEngine};

use crate::activity::DataProcessingActivity;
use crate::audit::{AuditOutcome, AuditRecord, AuditStatus, AuditSummary, EncryptedAuditResults};
use crate::certification::CertificationBook;
use crate::config::RegistryConfig;
use crate::context::CallContext;
use crate::error::RegistryError;
use crate::events::{EventRecord, RegistryEvent};
use crate::inputs::{
    AuditFindings, ComplianceData, ProcessingActivityData, MAX_RETENTION_MONTHS, MAX_SCORE,
};
use crate::profile::{ComplianceProfile, ComplianceStatus, EncryptedScores};
use crate::roles::{AuthContext, Role, RoleStore};
use crate::scoring::{RiskMultipliers, VIOLATION_THRESHOLD};
use crate::transaction::RegistryCall;

/// The result of a committed operation and the events it emitted, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    pub value: T,
    pub events: Vec<RegistryEvent>,
}

pub struct ComplianceRegistry<E: FheEngine, R: RoleStore> {
    config: RegistryConfig,
    engine: Arc<E>,
    roles: R,
    profiles: BTreeMap<Address, ComplianceProfile>,
    activities: BTreeMap<ActivityId, DataProcessingActivity>,
    audits: BTreeMap<AuditId, AuditRecord>,
    certifications: CertificationBook,
    next_audit_id: AuditId,
    last_audit_time: Option<Timestamp>,
    event_log: Vec<EventRecord>,
}

impl<E: FheEngine, R: RoleStore> std::fmt::Debug for ComplianceRegistry<E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceRegistry")
            .field("contract", &self.config.contract_address)
            .field("profiles", &self.profiles.len())
            .field("activities", &self.activities.len())
            .field("audits", &self.audits.len())
            .field("events", &self.event_log.len())
            .finish()
    }
}

impl<E: FheEngine, R: RoleStore> ComplianceRegistry<E, R> {
    pub fn new(config: RegistryConfig, engine: Arc<E>, roles: R) -> Self {
        Self {
            config,
            engine,
            roles,
            profiles: BTreeMap::new(),
            activities: BTreeMap::new(),
            audits: BTreeMap::new(),
            certifications: CertificationBook::new(),
            next_audit_id: AuditId::FIRST,
            last_audit_time: None,
            event_log: Vec::new(),
        }
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    /// Run one call on behalf of `ctx.caller`.
    pub fn execute(
        &mut self,
        ctx: &CallContext,
        call: &RegistryCall,
    ) -> Result<Vec<RegistryEvent>, RegistryError> {
        let result = match call {
            RegistryCall::SetRegulator { regulator } => self.set_regulator(ctx, *regulator),
            RegistryCall::AuthorizeAuditor { auditor } => self.authorize_auditor(ctx, *auditor),
            RegistryCall::RevokeAuditor { auditor } => self.revoke_auditor(ctx, *auditor),
            RegistryCall::AuthorizeDataController { controller } => {
                self.authorize_data_controller(ctx, *controller)
            }
            RegistryCall::RevokeDataController { controller } => {
                self.revoke_data_controller(ctx, *controller)
            }
            RegistryCall::RegisterComplianceData(data) => self.register_compliance_data(ctx, data),
            RegistryCall::RegisterProcessingActivity(data) => {
                self.register_processing_activity(ctx, data)
            }
            RegistryCall::ScheduleAudit { auditee, standard } => self
                .schedule_audit(ctx, *auditee, *standard)
                .map(|c| Committed {
                    value: (),
                    events: c.events,
                }),
            RegistryCall::StartAudit { audit_id } => self.start_audit(ctx, *audit_id),
            RegistryCall::CompleteAudit { audit_id, findings } => {
                self.complete_audit(ctx, *audit_id, findings)
            }
            RegistryCall::GrantCertification { entity, standard } => {
                self.grant_certification(ctx, *entity, *standard)
            }
            RegistryCall::RevokeCertification { entity, standard } => {
                self.revoke_certification(ctx, *entity, *standard)
            }
        };
        match result {
            Ok(committed) => Ok(committed.events),
            Err(e) => {
                tracing::debug!(
                    caller = %ctx.caller,
                    call = call.name(),
                    error = %e,
                    "call rejected"
                );
                Err(e)
            }
        }
    }

    // ─── Role administration ─────────────────────────────────────────────

    pub fn set_regulator(
        &mut self,
        ctx: &CallContext,
        regulator: Address,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::Owner)?;
        if regulator.is_zero() {
            return Err(RegistryError::ZeroAddress(Role::Regulator));
        }
        let previous = self.roles.regulator();
        self.roles.set_regulator(regulator);
        tracing::info!(%previous, %regulator, "regulator updated");
        Ok(self.commit(
            ctx,
            (),
            vec![RegistryEvent::RegulatorUpdated {
                previous,
                regulator,
            }],
        ))
    }

    pub fn authorize_auditor(
        &mut self,
        ctx: &CallContext,
        auditor: Address,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::Regulator)?;
        if auditor.is_zero() {
            return Err(RegistryError::ZeroAddress(Role::Auditor));
        }
        self.roles.set_auditor(auditor, true);
        tracing::info!(%auditor, "auditor authorized");
        Ok(self.commit(ctx, (), vec![RegistryEvent::AuditorAuthorized { auditor }]))
    }

    /// Revocation does not touch audits already scheduled by `auditor`.
    pub fn revoke_auditor(
        &mut self,
        ctx: &CallContext,
        auditor: Address,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::Regulator)?;
        self.roles.set_auditor(auditor, false);
        tracing::info!(%auditor, "auditor revoked");
        Ok(self.commit(ctx, (), vec![RegistryEvent::AuditorRevoked { auditor }]))
    }

    pub fn authorize_data_controller(
        &mut self,
        ctx: &CallContext,
        controller: Address,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::Regulator)?;
        if controller.is_zero() {
            return Err(RegistryError::ZeroAddress(Role::DataController));
        }
        self.roles.set_data_controller(controller, true);
        tracing::info!(%controller, "data controller authorized");
        Ok(self.commit(
            ctx,
            (),
            vec![RegistryEvent::DataControllerAuthorized { controller }],
        ))
    }

    /// The controller's profile, activities and certifications remain.
    pub fn revoke_data_controller(
        &mut self,
        ctx: &CallContext,
        controller: Address,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::Regulator)?;
        self.roles.set_data_controller(controller, false);
        tracing::info!(%controller, "data controller revoked");
        Ok(self.commit(
            ctx,
            (),
            vec![RegistryEvent::DataControllerRevoked { controller }],
        ))
    }

    // ─── Data controller operations ──────────────────────────────────────

    /// Create or overwrite the caller's compliance profile.
    pub fn register_compliance_data(
        &mut self,
        ctx: &CallContext,
        data: &ComplianceData,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::DataController)?;
        self.check_score("risk_score", data.risk_score)?;
        self.check_score("compliance_score", data.compliance_score)?;

        let readers = [self.config.contract_address, ctx.caller];
        let profile = ComplianceProfile {
            data_points: self.encrypt_for::<Euint32>(data.data_points, &readers)?,
            risk_score: self.encrypt_for::<Euint8>(data.risk_score, &readers)?,
            compliance_score: self.encrypt_for::<Euint8>(data.compliance_score, &readers)?,
            has_personal_data: data.has_personal_data,
            has_financial_data: data.has_financial_data,
            has_health_data: data.has_health_data,
            last_review_date: ctx.timestamp,
            controller: ctx.caller,
        };

        self.profiles.insert(ctx.caller, profile);
        tracing::info!(entity = %ctx.caller, "compliance data registered");
        Ok(self.commit(
            ctx,
            (),
            vec![RegistryEvent::ComplianceDataUpdated {
                entity: ctx.caller,
                timestamp: ctx.timestamp,
            }],
        ))
    }

    /// Create or replace the activity under `data.activity_id`.
    pub fn register_processing_activity(
        &mut self,
        ctx: &CallContext,
        data: &ProcessingActivityData,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::DataController)?;
        if data.retention_months > MAX_RETENTION_MONTHS {
            return Err(RegistryError::RetentionOutOfRange {
                value: data.retention_months,
                max: MAX_RETENTION_MONTHS,
            });
        }

        let readers = [self.config.contract_address, ctx.caller];
        let activity = DataProcessingActivity {
            activity_id: data.activity_id,
            purpose: self.encrypt_for::<Euint8>(data.purpose, &readers)?,
            data_subject_count: self.encrypt_for::<Euint32>(data.data_subject_count, &readers)?,
            retention_months: self.encrypt_for::<Euint16>(data.retention_months, &readers)?,
            has_consent: data.has_consent,
            is_minimized: data.is_minimized,
            has_security_measures: data.has_security_measures,
            registered_at: ctx.timestamp,
            controller: ctx.caller,
        };

        self.activities.insert(data.activity_id, activity);
        tracing::info!(
            activity_id = %data.activity_id,
            controller = %ctx.caller,
            "processing activity registered"
        );
        Ok(self.commit(
            ctx,
            (),
            vec![RegistryEvent::ProcessingActivityRegistered {
                activity_id: data.activity_id,
                controller: ctx.caller,
                timestamp: ctx.timestamp,
            }],
        ))
    }

    // ─── Audit lifecycle ─────────────────────────────────────────────────

    /// Schedule an audit of `auditee` against `standard`. Returns the new id.
    pub fn schedule_audit(
        &mut self,
        ctx: &CallContext,
        auditee: Address,
        standard: ComplianceStandard,
    ) -> Result<Committed<AuditId>, RegistryError> {
        self.auth(ctx).require(Role::Auditor)?;
        if !self.roles.is_data_controller(&auditee) {
            return Err(RegistryError::NotDataController(auditee));
        }
        let id = self.next_audit_id;
        if id.value() == u64::MAX {
            return Err(RegistryError::AuditIdsExhausted);
        }

        let readers = [self.config.contract_address];
        let zero_findings = self.encrypt_for::<Euint32>(0, &readers)?;
        let zero_penalty = self.encrypt_for::<Euint64>(0, &readers)?;

        self.audits.insert(
            id,
            AuditRecord::scheduled(
                id,
                standard,
                ctx.caller,
                auditee,
                zero_findings,
                zero_penalty,
                ctx.timestamp,
            ),
        );
        self.next_audit_id = id.next();
        self.last_audit_time = Some(ctx.timestamp);
        tracing::info!(audit_id = %id, %auditee, %standard, auditor = %ctx.caller, "audit scheduled");
        Ok(self.commit(
            ctx,
            id,
            vec![RegistryEvent::AuditScheduled {
                audit_id: id,
                auditee,
                standard,
            }],
        ))
    }

    /// SCHEDULED → IN_PROGRESS. Only the recorded auditor may start.
    pub fn start_audit(
        &mut self,
        ctx: &CallContext,
        audit_id: AuditId,
    ) -> Result<Committed<()>, RegistryError> {
        let record = self.audit_record(audit_id)?;
        record.require_auditor(ctx.caller)?;
        record.check_transition(AuditStatus::InProgress)?;

        self.audit_record_mut(audit_id)?.start(ctx.timestamp)?;
        tracing::info!(%audit_id, auditor = %ctx.caller, "audit started");
        Ok(self.commit(
            ctx,
            (),
            vec![RegistryEvent::AuditStarted {
                audit_id,
                auditor: ctx.caller,
            }],
        ))
    }

    /// Record findings and close the audit.
    ///
    /// If the auditee has a compliance profile its encrypted score is
    /// reduced by `findings × multiplier(risk)`. Events are emitted in the
    /// order `ComplianceScoreUpdated` (if a profile exists),
    /// `ViolationDetected` (if risk reaches the configured threshold),
    /// `AuditCompleted`.
    pub fn complete_audit(
        &mut self,
        ctx: &CallContext,
        audit_id: AuditId,
        findings: &AuditFindings,
    ) -> Result<Committed<()>, RegistryError> {
        let record = self.audit_record(audit_id)?;
        record.require_auditor(ctx.caller)?;
        record.check_transition(AuditStatus::Completed)?;
        let auditee = record.auditee;

        let readers = [self.config.contract_address, ctx.caller, auditee];
        let outcome = AuditOutcome {
            findings_count: self.encrypt_for::<Euint32>(findings.findings_count, &readers)?,
            penalty_amount: self.encrypt_for::<Euint64>(findings.penalty_amount, &readers)?,
            overall_risk: findings.risk_level,
            remediated: findings.remediated,
        };
        let adjusted_score = match self.profiles.get(&auditee) {
            Some(profile) => Some(self.penalized_score(
                profile,
                findings.findings_count,
                findings.risk_level,
            )?),
            None => None,
        };

        self.audit_record_mut(audit_id)?
            .complete(outcome, ctx.timestamp)?;

        let mut events = Vec::with_capacity(3);
        if let Some(score) = adjusted_score {
            if let Some(profile) = self.profiles.get_mut(&auditee) {
                profile.compliance_score = score;
                profile.last_review_date = ctx.timestamp;
            }
            events.push(RegistryEvent::ComplianceScoreUpdated {
                entity: auditee,
                timestamp: ctx.timestamp,
            });
        }
        if findings.risk_level >= VIOLATION_THRESHOLD {
            tracing::warn!(%audit_id, entity = %auditee, risk = %findings.risk_level, "violation detected");
            events.push(RegistryEvent::ViolationDetected {
                entity: auditee,
                audit_id,
                risk_level: findings.risk_level,
            });
        }
        events.push(RegistryEvent::AuditCompleted {
            audit_id,
            risk_level: findings.risk_level,
            remediated: findings.remediated,
        });
        tracing::info!(%audit_id, risk = %findings.risk_level, remediated = findings.remediated, "audit completed");
        Ok(self.commit(ctx, (), events))
    }

    // ─── Certifications ──────────────────────────────────────────────────

    /// Certify a registered data controller. Independent of audit history.
    pub fn grant_certification(
        &mut self,
        ctx: &CallContext,
        entity: Address,
        standard: ComplianceStandard,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::Regulator)?;
        if !self.roles.is_data_controller(&entity) {
            return Err(RegistryError::NotDataController(entity));
        }
        self.certifications.grant(entity, standard);
        tracing::info!(%entity, %standard, "certification granted");
        Ok(self.commit(
            ctx,
            (),
            vec![RegistryEvent::CertificationGranted { entity, standard }],
        ))
    }

    pub fn revoke_certification(
        &mut self,
        ctx: &CallContext,
        entity: Address,
        standard: ComplianceStandard,
    ) -> Result<Committed<()>, RegistryError> {
        self.auth(ctx).require(Role::Regulator)?;
        self.certifications.revoke(entity, standard);
        tracing::info!(%entity, %standard, "certification revoked");
        Ok(self.commit(
            ctx,
            (),
            vec![RegistryEvent::CertificationRevoked { entity, standard }],
        ))
    }

    // ─── Views ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    pub fn roles(&self) -> &R {
        &self.roles
    }

    pub fn owner(&self) -> Address {
        self.roles.owner()
    }

    pub fn regulator(&self) -> Address {
        self.roles.regulator()
    }

    pub fn is_authorized_auditor(&self, account: &Address) -> bool {
        self.roles.is_auditor(account)
    }

    pub fn is_data_controller(&self, account: &Address) -> bool {
        self.roles.is_data_controller(account)
    }

    /// Roles `account` currently holds.
    pub fn roles_of(&self, account: Address) -> Vec<Role> {
        AuthContext::resolve(&self.roles, account).roles()
    }

    /// Number of audits ever scheduled.
    pub fn total_audits(&self) -> u64 {
        self.next_audit_id.value() - 1
    }

    pub fn next_audit_id(&self) -> AuditId {
        self.next_audit_id
    }

    /// Time of the most recent `schedule_audit`.
    pub fn last_audit_time(&self) -> Option<Timestamp> {
        self.last_audit_time
    }

    pub fn compliance_status(&self, entity: &Address) -> Option<ComplianceStatus> {
        self.profiles.get(entity).map(ComplianceProfile::status)
    }

    pub fn encrypted_compliance_scores(&self, entity: &Address) -> Option<EncryptedScores> {
        self.profiles.get(entity).map(ComplianceProfile::encrypted_scores)
    }

    pub fn audit(&self, audit_id: AuditId) -> Result<AuditSummary, RegistryError> {
        self.audit_record(audit_id).map(AuditSummary::from)
    }

    pub fn encrypted_audit_results(
        &self,
        audit_id: AuditId,
    ) -> Result<EncryptedAuditResults, RegistryError> {
        self.audit_record(audit_id).map(|r| EncryptedAuditResults {
            findings_count: r.findings_count,
            penalty_amount: r.penalty_amount,
        })
    }

    pub fn processing_activity(&self, activity_id: &ActivityId) -> Option<&DataProcessingActivity> {
        self.activities.get(activity_id)
    }

    pub fn has_certification(&self, entity: &Address, standard: ComplianceStandard) -> bool {
        self.certifications.has(entity, standard)
    }

    pub fn certifications(&self, entity: &Address) -> Vec<ComplianceStandard> {
        self.certifications.standards_of(entity)
    }

    /// Events with `sequence >= since`, oldest first.
    pub fn events_since(&self, since: u64) -> &[EventRecord] {
        let start = usize::try_from(since)
            .unwrap_or(usize::MAX)
            .min(self.event_log.len());
        &self.event_log[start..]
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn auth(&self, ctx: &CallContext) -> AuthContext {
        AuthContext::resolve(&self.roles, ctx.caller)
    }

    fn check_score(&self, field: &'static str, value: u8) -> Result<(), RegistryError> {
        if value > MAX_SCORE {
            return Err(RegistryError::ScoreOutOfRange {
                field,
                value,
                max: MAX_SCORE,
            });
        }
        Ok(())
    }

    /// Ids outside `1..next_audit_id` are unknown.
    fn audit_record(&self, audit_id: AuditId) -> Result<&AuditRecord, RegistryError> {
        if audit_id.value() == 0 || audit_id >= self.next_audit_id {
            return Err(RegistryError::UnknownAudit(audit_id));
        }
        self.audits
            .get(&audit_id)
            .ok_or(RegistryError::UnknownAudit(audit_id))
    }

    fn audit_record_mut(&mut self, audit_id: AuditId) -> Result<&mut AuditRecord, RegistryError> {
        self.audits
            .get_mut(&audit_id)
            .ok_or(RegistryError::UnknownAudit(audit_id))
    }

    fn encrypt_for<T: EncryptedType>(
        &self,
        value: T::Plain,
        readers: &[Address],
    ) -> Result<Ciphertext<T>, RegistryError> {
        let ct = self.engine.encrypt::<T>(value)?;
        for reader in readers {
            self.engine.allow(ct.handle(), *reader)?;
        }
        Ok(ct)
    }

    fn penalized_score(
        &self,
        profile: &ComplianceProfile,
        findings: u32,
        risk: RiskLevel,
    ) -> Result<Ciphertext<Euint8>, RegistryError> {
        let reduction = RiskMultipliers::default().score_reduction(findings, risk);
        let reduction =
            self.encrypt_for::<Euint8>(reduction, &[self.config.contract_address])?;
        let score = self.engine.sub(&profile.compliance_score, &reduction)?;
        for reader in [self.config.contract_address, profile.controller] {
            self.engine.allow(score.handle(), reader)?;
        }
        Ok(score)
    }

    fn commit<T>(
        &mut self,
        ctx: &CallContext,
        value: T,
        events: Vec<RegistryEvent>,
    ) -> Committed<T> {
        for event in &events {
            self.event_log.push(EventRecord {
                sequence: self.event_log.len() as u64,
                block_time: ctx.timestamp,
                event: event.clone(),
            });
        }
        Committed { value, events }
    }
}
