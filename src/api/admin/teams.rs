//! Team management admin endpoints
//!
//! Teams are keyed by their owning user account. Creation and editing
//! happen inline through the user endpoints, so only read and delete are
//! exposed here.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::{Team, TeamQuery};

/// Team response for admin API
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub user_id: String,
    pub informal_email: String,
    pub affiliation: Option<String>,
    pub country: String,
    pub nop_team: bool,
    pub net_number: Option<i32>,
    pub effective_net_number: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            user_id: team.user_id().as_str().to_string(),
            informal_email: team.informal_email().to_string(),
            affiliation: team.affiliation().map(ToString::to_string),
            country: team.country().to_string(),
            nop_team: team.nop_team(),
            net_number: team.net_number(),
            effective_net_number: team.effective_net_number(),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

/// List teams response
#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub total: usize,
}

/// Query parameters for the team listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTeamsParams {
    pub nop_team: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

fn build_team_query(params: &ListTeamsParams) -> TeamQuery {
    let mut query = TeamQuery::new();

    if let Some(nop_team) = params.nop_team {
        query = query.with_nop_team(nop_team);
    }
    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }
    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    query
}

/// GET /admin/teams
pub async fn list_teams(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<ListTeamsParams>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    debug!(nop_team = ?params.nop_team, "Admin listing teams");

    let query = build_team_query(&params);

    let total = state
        .team_service
        .count(&query)
        .await
        .map_err(ApiError::from)?;

    let teams = state
        .team_service
        .list(&query)
        .await
        .map_err(ApiError::from)?;

    let teams = teams.iter().map(TeamResponse::from).collect();

    Ok(Json(ListTeamsResponse { teams, total }))
}

/// GET /admin/teams/:user_id
pub async fn get_team(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(user_id = %user_id, "Admin getting team");

    let team = state
        .team_service
        .get_by_user(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("No team for user '{}'", user_id)))?;

    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /admin/teams/:user_id
pub async fn delete_team(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(user_id = %user_id, "Admin deleting team");

    let deleted = state
        .team_service
        .delete_by_user(&user_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "No team for user '{}'",
            user_id
        )));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "user_id": user_id
    })))
}
