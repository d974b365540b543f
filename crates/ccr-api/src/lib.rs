//! # ccr-api — Ledger Host for the Confidential Compliance Registry
//!
//! Serves one registry over HTTP. Mutations arrive as signed calls and are
//! applied in submission order under a single lock; views read the same
//! state. Decryption goes straight to the engine and never through the
//! registry.
//!
//! ## API Surface
//!
//! | Prefix                  | Module                           |
//! |-------------------------|----------------------------------|
//! | `/v1/transactions`      | [`routes::transactions`]         |
//! | `/v1/nonces/*`          | [`routes::transactions`]         |
//! | `/v1/roles/*`           | [`routes::roles`]                |
//! | `/v1/compliance/*`      | [`routes::compliance`]           |
//! | `/v1/activities/*`      | [`routes::compliance`]           |
//! | `/v1/audits/*`          | [`routes::audits`]               |
//! | `/v1/certifications/*`  | [`routes::certifications`]       |
//! | `/v1/events`            | [`routes::events`]               |
//! | `/v1/decrypt/*`         | [`routes::decrypt`]              |
//!
//! ## Authentication
//!
//! There is no bearer token. A call's signature is its authentication,
//! and the registry's role checks are its authorization.

pub mod error;
pub mod extractors;
pub mod ledger;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::transactions::router())
        .merge(routes::roles::router())
        .merge(routes::compliance::router())
        .merge(routes::audits::router())
        .merge(routes::certifications::router())
        .merge(routes::events::router())
        .merge(routes::decrypt::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness() -> &'static str {
    "ready"
}
