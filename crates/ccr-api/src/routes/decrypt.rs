//! # Decryption
//!
//! Routes:
//! - POST /v1/decrypt/user — Signed request; requester and contract must
//!   both be on every handle's ACL
//! - POST /v1/decrypt/public — Handles marked publicly decryptable only
//!
//! Neither route touches the ledger lock. The registry never decrypts;
//! these routes are the only path from a handle to a plaintext.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use ccr_core::Timestamp;
use ccr_crypto::Ed25519Signature;
use ccr_fhe::{public_decrypt, user_decrypt, DecryptedValue, Handle, UserDecryptRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserDecryptBody {
    pub request: UserDecryptRequest,
    pub signature: Ed25519Signature,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublicDecryptBody {
    pub handles: Vec<Handle>,
}

impl Validate for PublicDecryptBody {
    fn validate(&self) -> Result<(), String> {
        if self.handles.is_empty() {
            return Err("handles must not be empty".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub values: Vec<DecryptedValue>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/decrypt/user", post(decrypt_for_user))
        .route("/v1/decrypt/public", post(decrypt_public))
}

async fn decrypt_for_user(
    State(state): State<AppState>,
    body: Result<Json<UserDecryptBody>, JsonRejection>,
) -> Result<Json<DecryptResponse>, AppError> {
    let body = extract_json(body)?;
    let values = user_decrypt(
        state.engine.as_ref(),
        &state.decryption_domain,
        &body.request,
        &body.signature,
        Timestamp::now(),
    )?;
    Ok(Json(DecryptResponse { values }))
}

async fn decrypt_public(
    State(state): State<AppState>,
    body: Result<Json<PublicDecryptBody>, JsonRejection>,
) -> Result<Json<DecryptResponse>, AppError> {
    let body = extract_validated_json(body)?;
    let values = public_decrypt(state.engine.as_ref(), &body.handles)?;
    Ok(Json(DecryptResponse { values }))
}
