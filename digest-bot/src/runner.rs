use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::components::{build_app_state, build_relay_components};
use crate::config::RelayConfig;
use crate::core::init_tracing;
use crate::server::router;

/// Main entry: validate config, init logging, build components, then serve until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_relay(config: RelayConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let components = build_relay_components(&config);
    let app = router(build_app_state(&components));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        addr = %addr,
        mode = %config.mode().as_str(),
        max_retained = config.history().max_retained_messages,
        token_limit = config.history().max_tokens_per_summary,
        "Relay started successfully"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
