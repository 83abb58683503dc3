use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ward_core::config::WardConfig;
use ward_core::dexscreener::DexClient;
use ward_core::github::GithubClient;

mod audit;

use audit::{contract_audit_handler, AppState};

async fn health() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = WardConfig::from_env()?;

    let state = AppState {
        dex: DexClient::new(config.providers.dexscreener_base_url.clone()),
        github: GithubClient::new(config.providers.github_base_url.clone()),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/contract-audit", get(contract_audit_handler))
        .with_state(state);

    let addr: SocketAddr = config.api.bind_addr.parse()?;
    tracing::info!("Starting audit API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
