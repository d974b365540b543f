//! # Roles
//!
//! Routes:
//! - GET /v1/roles — Owner, regulator, auditors and data controllers
//! - GET /v1/roles/{address} — Roles one address holds

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use ccr_core::Address;
use ccr_registry::{Role, RoleStore};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::parse_address;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleDirectory {
    pub owner: Address,
    pub regulator: Address,
    pub auditors: Vec<Address>,
    pub data_controllers: Vec<Address>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountRoles {
    pub address: Address,
    pub roles: Vec<Role>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/roles", get(role_directory))
        .route("/v1/roles/{address}", get(account_roles))
}

async fn role_directory(State(state): State<AppState>) -> Json<RoleDirectory> {
    let ledger = state.ledger.lock();
    let roles = ledger.registry().roles();
    Json(RoleDirectory {
        owner: roles.owner(),
        regulator: roles.regulator(),
        auditors: roles.auditors(),
        data_controllers: roles.data_controllers(),
    })
}

async fn account_roles(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AccountRoles>, AppError> {
    let address = parse_address(&address)?;
    let roles = state.ledger.lock().registry().roles_of(address);
    Ok(Json(AccountRoles { address, roles }))
}
