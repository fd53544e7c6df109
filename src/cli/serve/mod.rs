//! Serve command - runs the admin API server

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::api::create_router_with_state;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::metrics::{create_metrics_router, init_metrics, PrometheusMetrics};

/// Run the admin API server
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    let state = crate::create_app_state_with_config(&config).await?;
    let metrics = init_metrics(&config.metrics);
    let app = create_app_router(state, metrics);

    let addr = build_socket_addr(&config)?;
    info!("Starting admin API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Admin API server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
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
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

fn create_app_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = create_router_with_state(state);

    // Metrics endpoint when enabled
    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
}
