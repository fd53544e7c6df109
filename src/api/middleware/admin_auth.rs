//! Admin authentication middleware
//!
//! Every admin endpoint requires the pre-shared admin token, presented
//! either as `Authorization: Bearer <token>` or in the `X-Admin-Token`
//! header.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Extractor that requires a valid admin token
///
/// Token sources (tried in order):
/// 1. `Authorization: Bearer <token>`
/// 2. `X-Admin-Token: <token>`
#[derive(Debug, Clone)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(parts) else {
            return Err(ApiError::unauthorized(
                "Admin access required. Provide the admin token as a Bearer token or X-Admin-Token header",
            ));
        };

        if !state.admin_token.verify(token) {
            debug!("Rejected admin request with invalid token");
            return Err(ApiError::unauthorized("Invalid admin token"));
        }

        Ok(RequireAdmin)
    }
}

fn extract_token(parts: &Parts) -> Option<&str> {
    if let Some(value) = parts.headers.get("authorization") {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.trim());
            }
        }
    }

    parts
        .headers
        .get("x-admin-token")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
}
