//! # tfar-api: Binary Entry Point
//!
//! Starts the registry HTTP server on `PORT` (default 8080) and shuts down
//! gracefully on SIGINT or SIGTERM.

use tfar_api::config::AppConfig;
use tfar_api::state::AppState;
use tfar_store::{Credentials, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tfar_api::telemetry::init(config.log_format);

    tracing::info!(
        service = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        project = %config.project_id,
        location = %config.location,
        "starting registry"
    );

    let store_config = config.store_config()?;
    let credentials = Credentials::ambient().await.map_err(|e| {
        tracing::error!("Credential discovery failed: {e}");
        e
    })?;
    let transport = Transport::new(store_config, credentials)?;
    let app = tfar_api::app(AppState::new(transport));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Registry listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("successful shutdown");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for SIGINT: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
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
    tracing::info!("shutdown signal received, draining connections");
}
