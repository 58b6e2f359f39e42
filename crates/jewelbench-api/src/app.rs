//! Application builder: wires router, middleware and state, and runs the
//! server.

use jewelbench_core::config::AppConfig;
use jewelbench_core::error::AppError;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from configuration.
pub fn build_app(config: AppConfig) -> axum::Router {
    build_router(AppState::new(config))
}

/// Runs the JewelBench server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting JewelBench server...");

    let temp_dir = config.storage.temp_path();
    tokio::fs::create_dir_all(&temp_dir).await.map_err(|e| {
        AppError::storage(format!(
            "Failed to create temp dir '{}': {e}",
            temp_dir.display()
        ))
    })?;

    let addr = config.bind_address();
    let app = build_app(config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(
        address = %addr,
        temp_dir = %temp_dir.display(),
        "JewelBench server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("JewelBench server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
