//! SalonSuite Edge API server

use anyhow::Context;
use salonsuite_api::{build_app, telemetry, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    telemetry::init_tracing().context("failed to initialize tracing")?;

    let config = Config::from_env().context("invalid configuration")?;
    let bind_address = config.bind_address.clone();
    let state = AppState::from_config(config).context("failed to build application state")?;

    tracing::info!(
        bind_address = %bind_address,
        root_domain = %state.resolver.root_domain(),
        tenants = state.directory.len(),
        "Starting SalonSuite edge server"
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
