//! # Gallery Server Library
//!
//! Wiring and lifecycle for the gallery API process.

pub mod di;
pub mod startup;

use di::AppContainer;
use gallery_config::AppConfig;
use gallery_core::{GalleryError, GalleryResult};
use gallery_rest::create_router;
use tokio::signal;
use tracing::info;

/// Builds every component, binds the listener and serves until a shutdown
/// signal arrives.
pub async fn serve(config: AppConfig) -> GalleryResult<()> {
    let container = AppContainer::build(&config).await?;
    let router = create_router(container.app_state(), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GalleryError::Internal(format!("Failed to bind {addr}: {e}")))?;

    startup::print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GalleryError::Internal(format!("REST server error: {e}")))?;

    container.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
