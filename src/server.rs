//! HTTP server initialization and runtime setup.
//!
//! Builds the exchange client and redirect service, then runs the Axum server
//! until SIGINT/SIGTERM.

use crate::application::services::RedirectService;
use crate::config::Config;
use crate::domain::decision::RedirectEngine;
use crate::domain::preview_host::PreviewHostResolver;
use crate::infrastructure::exchange::HttpLinkExchange;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds the shared application state from configuration.
///
/// # Errors
///
/// Returns an error if the exchange HTTP client cannot be created.
pub fn build_state(config: Config) -> Result<AppState> {
    let exchange = HttpLinkExchange::new(
        config.exchange_endpoint.clone(),
        Duration::from_secs(config.exchange_timeout_seconds),
    )
    .context("Failed to create exchange client")?;

    let engine = RedirectEngine::new(PreviewHostResolver::new(&config.preview_url_style));
    let redirect_service = RedirectService::new(engine, Arc::new(exchange));

    Ok(AppState::new(Arc::new(redirect_service), Arc::new(config)))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The exchange client cannot be created
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;

    let state = build_state(config)?;
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited properly");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down server...");
}
