use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::clock::SystemClock;
use server::config::AppConfig;
use server::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(true).init();

    let config = AppConfig::load().context("Failed to load config")?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host/server.port")?;

    info!(
        contract = %config.contract.address,
        max_judges = config.contract.max_judges,
        "Deploying hackathon contract"
    );
    let state = AppState::new(config, Arc::new(SystemClock));
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
