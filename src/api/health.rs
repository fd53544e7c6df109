//! Health check endpoints for Kubernetes probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::api::types::Json;
use serde::Serialize;

use super::state::AppState;

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Simple health check - returns 200 if the service is running
/// Used for basic liveness probes
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check with dependency verification
/// Checks if the service can handle requests
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let mut checks = Vec::new();
    let mut overall_status = HealthStatus::Healthy;

    // Storage connectivity, through the singleton read
    let game_control_check = check_game_control_service(&state).await;

    if game_control_check.status != HealthStatus::Healthy {
        overall_status = HealthStatus::Unhealthy;
    }
    checks.push(game_control_check);

    let user_check = check_user_service(&state).await;

    if user_check.status != HealthStatus::Healthy {
        overall_status = HealthStatus::Unhealthy;
    }
    checks.push(user_check);

    let latency = start.elapsed().as_millis() as u64;
    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(latency),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness check - simple check to verify the service is running
/// Used for Kubernetes liveness probes to detect crashes
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_game_control_service(state: &AppState) -> HealthCheck {
    let start = Instant::now();

    match state.game_control_service.get().await {
        Ok(_) => HealthCheck {
            name: "game_control_service".to_string(),
            status: HealthStatus::Healthy,
            message: None,
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => HealthCheck {
            name: "game_control_service".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
    }
}

async fn check_user_service(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let query = crate::domain::user::UserQuery::new().with_limit(1);

    match state.user_service.list(query).await {
        Ok(_) => HealthCheck {
            name: "user_service".to_string(),
            status: HealthStatus::Healthy,
            message: None,
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => HealthCheck {
            name: "user_service".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
    }
}
