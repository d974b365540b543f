//! # Certifications
//!
//! Routes:
//! - GET /v1/certifications/{address} — Standards an entity holds
//! - GET /v1/certifications/{address}/{standard} — One flag

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use ccr_core::{Address, ComplianceStandard};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{parse_address, parse_standard};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct EntityCertifications {
    pub entity: Address,
    pub standards: Vec<ComplianceStandard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CertificationFlag {
    pub entity: Address,
    pub standard: ComplianceStandard,
    pub certified: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/certifications/{address}", get(entity_certifications))
        .route(
            "/v1/certifications/{address}/{standard}",
            get(certification_flag),
        )
}

async fn entity_certifications(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<EntityCertifications>, AppError> {
    let entity = parse_address(&address)?;
    let standards = state.ledger.lock().registry().certifications(&entity);
    Ok(Json(EntityCertifications { entity, standards }))
}

async fn certification_flag(
    State(state): State<AppState>,
    Path((address, standard)): Path<(String, String)>,
) -> Result<Json<CertificationFlag>, AppError> {
    let entity = parse_address(&address)?;
    let standard = parse_standard(&standard)?;
    let certified = state
        .ledger
        .lock()
        .registry()
        .has_certification(&entity, standard);
    Ok(Json(CertificationFlag {
        entity,
        standard,
        certified,
    }))
}
