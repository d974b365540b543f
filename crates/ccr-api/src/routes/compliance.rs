//! # Compliance Profiles & Processing Activities
//!
//! Routes:
//! - GET /v1/compliance/{address} — Plaintext profile fields
//! - GET /v1/compliance/{address}/scores — Encrypted score handles
//! - GET /v1/activities/{activity_id} — One processing activity
//!
//! Encrypted fields are returned as handles. Reading their values goes
//! through `/v1/decrypt/user`, subject to the handle's ACL.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use ccr_registry::{ComplianceStatus, DataProcessingActivity, EncryptedScores};

use crate::error::AppError;
use crate::extractors::{parse_activity_id, parse_address};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/compliance/{address}", get(compliance_status))
        .route("/v1/compliance/{address}/scores", get(encrypted_scores))
        .route("/v1/activities/{activity_id}", get(processing_activity))
}

async fn compliance_status(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ComplianceStatus>, AppError> {
    let entity = parse_address(&address)?;
    let ledger = state.ledger.lock();
    ledger
        .registry()
        .compliance_status(&entity)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no compliance profile for {entity}")))
}

async fn encrypted_scores(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<EncryptedScores>, AppError> {
    let entity = parse_address(&address)?;
    let ledger = state.ledger.lock();
    ledger
        .registry()
        .encrypted_compliance_scores(&entity)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no compliance profile for {entity}")))
}

async fn processing_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<DataProcessingActivity>, AppError> {
    let activity_id = parse_activity_id(&activity_id)?;
    let ledger = state.ledger.lock();
    ledger
        .registry()
        .processing_activity(&activity_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("processing activity {activity_id}")))
}
