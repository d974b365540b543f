//! # ccr-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the registry host.
//! Binds to configurable port (default 8080).

use ccr_api::state::{AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(?config, "starting registry host");

    let state = AppState::from_config(&config).map_err(|e| {
        tracing::error!("startup failed: {e}");
        e
    })?;
    tracing::info!(
        contract = %state.decryption_domain.verifying_contract,
        chain_id = state.decryption_domain.chain_id,
        "registry initialized"
    );

    let app = ccr_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("CCR API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
