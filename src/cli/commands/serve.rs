use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_address();

    let shared = Arc::new(SharedState::new(config).await?);
    let state = api::create_app_state(shared).await?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Watchlist listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
