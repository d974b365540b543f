//! # Transactions
//!
//! Routes:
//! - POST /v1/transactions — Submit a signed registry call
//! - GET  /v1/transactions/{tx_id} — Receipt of a committed call
//! - GET  /v1/nonces/{address} — Next expected nonce for a signer

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use ccr_core::{Address, Timestamp};
use ccr_registry::SignedCall;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_json, parse_address};
use crate::ledger::TransactionReceipt;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct NonceResponse {
    pub address: Address,
    pub next_nonce: u64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/transactions", post(submit_transaction))
        .route("/v1/transactions/{tx_id}", get(get_receipt))
        .route("/v1/nonces/{address}", get(get_nonce))
}

/// POST /v1/transactions — Verify, order and execute a signed call.
async fn submit_transaction(
    State(state): State<AppState>,
    body: Result<Json<SignedCall>, JsonRejection>,
) -> Result<Json<TransactionReceipt>, AppError> {
    let signed = extract_json(body)?;
    let receipt = state.ledger.lock().apply(&signed, Timestamp::now())?;
    state.receipts.insert(receipt.tx_id, receipt.clone());
    Ok(Json(receipt))
}

/// GET /v1/transactions/{tx_id} — Fetch a receipt.
async fn get_receipt(
    State(state): State<AppState>,
    Path(tx_id): Path<Uuid>,
) -> Result<Json<TransactionReceipt>, AppError> {
    state
        .receipts
        .get(&tx_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("transaction {tx_id}")))
}

/// GET /v1/nonces/{address} — Next nonce the signer must use.
async fn get_nonce(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<NonceResponse>, AppError> {
    let address = parse_address(&address)?;
    let next_nonce = state.ledger.lock().next_nonce(&address);
    Ok(Json(NonceResponse {
        address,
        next_nonce,
    }))
}
