use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::admin;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no state needed)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Admin API
        .nest("/admin", admin::create_admin_router())
        // Add state and middleware
        .with_state(state)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(axum_middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
