//! # Audits
//!
//! Routes:
//! - GET /v1/audits/stats — Audit count, next id, last audit time
//! - GET /v1/audits/{id} — Plaintext audit summary
//! - GET /v1/audits/{id}/results — Encrypted findings and penalty handles

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use ccr_core::{AuditId, Timestamp};
use ccr_registry::{AuditSummary, EncryptedAuditResults};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::parse_audit_id;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_audits: u64,
    pub next_audit_id: AuditId,
    pub last_audit_time: Option<Timestamp>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/audits/stats", get(audit_stats))
        .route("/v1/audits/{id}", get(audit_summary))
        .route("/v1/audits/{id}/results", get(audit_results))
}

async fn audit_stats(State(state): State<AppState>) -> Json<AuditStats> {
    let ledger = state.ledger.lock();
    let registry = ledger.registry();
    Json(AuditStats {
        total_audits: registry.total_audits(),
        next_audit_id: registry.next_audit_id(),
        last_audit_time: registry.last_audit_time(),
    })
}

async fn audit_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuditSummary>, AppError> {
    let id = parse_audit_id(&id)?;
    let ledger = state.ledger.lock();
    Ok(Json(ledger.registry().audit(id)?))
}

async fn audit_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EncryptedAuditResults>, AppError> {
    let id = parse_audit_id(&id)?;
    let ledger = state.ledger.lock();
    Ok(Json(ledger.registry().encrypted_audit_results(id)?))
}
