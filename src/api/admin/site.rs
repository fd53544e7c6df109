//! Admin site metadata endpoint
//!
//! Serves the branding strings an admin frontend displays: the page header
//! derived from the configured competition name, and the index title.

use axum::extract::State;
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

/// Admin site branding for frontends
#[derive(Debug, Clone, Serialize)]
pub struct SiteInfoResponse {
    pub competition_name: String,
    pub site_header: String,
    pub index_title: String,
    pub version: String,
}

/// GET /admin/site
pub async fn get_site_info(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<SiteInfoResponse>, ApiError> {
    debug!("Admin reading site info");

    let competition_name = state.competition_name.to_string();

    Ok(Json(SiteInfoResponse {
        site_header: format!("{} administration", competition_name),
        index_title: "Administration home".to_string(),
        competition_name,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
