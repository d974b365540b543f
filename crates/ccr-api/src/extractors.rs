//! # Extractors & Validation
//!
//! JSON body extraction with error mapping, and path segment parsing for
//! addresses, activity ids, audit ids and standards.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use ccr_core::{ActivityId, Address, AuditId, ComplianceStandard};

use crate::error::AppError;

/// Request checks beyond what serde enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and run [`Validate`] on it.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

pub fn parse_address(s: &str) -> Result<Address, AppError> {
    s.parse()
        .map_err(|e| AppError::BadRequest(format!("invalid address {s:?}: {e}")))
}

pub fn parse_activity_id(s: &str) -> Result<ActivityId, AppError> {
    s.parse()
        .map_err(|e| AppError::BadRequest(format!("invalid activity id {s:?}: {e}")))
}

pub fn parse_audit_id(s: &str) -> Result<AuditId, AppError> {
    s.parse::<u64>()
        .map(AuditId)
        .map_err(|e| AppError::BadRequest(format!("invalid audit id {s:?}: {e}")))
}

pub fn parse_standard(s: &str) -> Result<ComplianceStandard, AppError> {
    s.parse()
        .map_err(|e| AppError::BadRequest(format!("invalid standard {s:?}: {e}")))
}
