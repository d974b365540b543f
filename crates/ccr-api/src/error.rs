//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps registry, ledger and decryption errors to HTTP status codes with a
//! JSON body of `{"error": {"code", "message"}}`. Internal failures are
//! logged and replaced with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ccr_fhe::FheError;
use ccr_registry::RegistryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::LedgerError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "FORBIDDEN").
    pub code: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// 422.
    #[error("validation error: {0}")]
    Validation(String),

    /// 400. Body or path could not be parsed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 401. Signature or request validity failure.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 403. Caller lacks the role or ACL entry.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 409.
    #[error("conflict: {0}")]
    Conflict(String),

    /// 500. Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match &err {
            RegistryError::Unauthorized { .. } | RegistryError::NotAuditOwner { .. } => {
                Self::Forbidden(err.to_string())
            }
            RegistryError::ScoreOutOfRange { .. }
            | RegistryError::RetentionOutOfRange { .. }
            | RegistryError::ZeroAddress(_) => Self::Validation(err.to_string()),
            RegistryError::UnknownAudit(_) => Self::NotFound(err.to_string()),
            RegistryError::NotDataController(_)
            | RegistryError::InvalidTransition { .. }
            | RegistryError::AuditIdsExhausted => Self::Conflict(err.to_string()),
            RegistryError::InvalidSignature(_) => Self::Unauthorized(err.to_string()),
            RegistryError::Encryption(_) | RegistryError::Canonicalization(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<FheError> for AppError {
    fn from(err: FheError) -> Self {
        match &err {
            FheError::AccessDenied { .. } | FheError::NotPubliclyDecryptable(_) => {
                Self::Forbidden(err.to_string())
            }
            FheError::UnknownHandle(_) => Self::NotFound(err.to_string()),
            FheError::EmptyRequest | FheError::InvalidDuration(_) => {
                Self::Validation(err.to_string())
            }
            FheError::InvalidSignature(_)
            | FheError::RequestNotYetValid { .. }
            | FheError::RequestExpired { .. } => Self::Unauthorized(err.to_string()),
            FheError::TypeMismatch { .. }
            | FheError::MalformedPlaintext(_)
            | FheError::Canonicalization(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NonceMismatch { .. } => Self::Conflict(err.to_string()),
            LedgerError::Rejected(inner) => inner.into(),
        }
    }
}
