//! Game control admin endpoints
//!
//! The game control record is a singleton. Reading always succeeds (the
//! defaults are served before anything has been saved) and updating
//! replaces every editable field at once, the way a submitted settings
//! form would. The current tick is reported but never writable here.

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::game_control::{GameControl, DEFAULT_TICK_DURATION_SECS, DEFAULT_VALID_TICKS};
use crate::infrastructure::game_control::UpdateGameControlRequest;

/// Request to update the game control settings
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGameControlApiRequest {
    #[serde(default)]
    pub services_public: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default = "default_tick_duration")]
    pub tick_duration_secs: u32,
    #[serde(default = "default_valid_ticks")]
    pub valid_ticks: u32,
    #[serde(default)]
    pub registration_open: bool,
    #[serde(default)]
    pub registration_confirm_text: Option<String>,
    #[serde(default)]
    pub min_net_number: Option<i32>,
    #[serde(default)]
    pub max_net_number: Option<i32>,
}

fn default_tick_duration() -> u32 {
    DEFAULT_TICK_DURATION_SECS
}

fn default_valid_ticks() -> u32 {
    DEFAULT_VALID_TICKS
}

/// Game control state for the admin API
#[derive(Debug, Clone, Serialize)]
pub struct GameControlResponse {
    pub services_public: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub tick_duration_secs: u32,
    pub valid_ticks: u32,
    pub current_tick: i32,
    pub competition_started: bool,
    pub registration_open: bool,
    pub registration_confirm_text: Option<String>,
    pub min_net_number: Option<i32>,
    pub max_net_number: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&GameControl> for GameControlResponse {
    fn from(control: &GameControl) -> Self {
        Self {
            services_public: control.services_public().map(|t| t.to_rfc3339()),
            start: control.start().map(|t| t.to_rfc3339()),
            end: control.end().map(|t| t.to_rfc3339()),
            tick_duration_secs: control.tick_duration_secs(),
            valid_ticks: control.valid_ticks(),
            current_tick: control.current_tick(),
            competition_started: control.competition_started(),
            registration_open: control.registration_open(),
            registration_confirm_text: control
                .registration_confirm_text()
                .map(ToString::to_string),
            min_net_number: control.min_net_number(),
            max_net_number: control.max_net_number(),
            created_at: control.created_at().to_rfc3339(),
            updated_at: control.updated_at().to_rfc3339(),
        }
    }
}

/// GET /admin/game-control
pub async fn get_game_control(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<GameControlResponse>, ApiError> {
    debug!("Admin reading game control");

    let control = state
        .game_control_service
        .get()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(GameControlResponse::from(&control)))
}

/// PUT /admin/game-control
pub async fn update_game_control(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(request): Json<UpdateGameControlApiRequest>,
) -> Result<Json<GameControlResponse>, ApiError> {
    debug!(
        tick_duration_secs = request.tick_duration_secs,
        "Admin updating game control"
    );

    let update_request = UpdateGameControlRequest {
        services_public: request.services_public,
        start: request.start,
        end: request.end,
        tick_duration_secs: request.tick_duration_secs,
        valid_ticks: request.valid_ticks,
        registration_open: request.registration_open,
        registration_confirm_text: request.registration_confirm_text,
        min_net_number: request.min_net_number,
        max_net_number: request.max_net_number,
    };

    let control = state
        .game_control_service
        .update(update_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(GameControlResponse::from(&control)))
}
