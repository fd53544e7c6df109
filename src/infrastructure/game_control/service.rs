//! Game control service

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::game_control::{GameControl, GameControlRepository};
use crate::domain::DomainError;

/// Full-record update for the game control settings
///
/// Every editable field is submitted on each update, like a settings form.
/// The current tick is deliberately absent: only the controller advances it.
#[derive(Debug, Clone)]
pub struct UpdateGameControlRequest {
    pub services_public: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub tick_duration_secs: u32,
    pub valid_ticks: u32,
    pub registration_open: bool,
    pub registration_confirm_text: Option<String>,
    pub min_net_number: Option<i32>,
    pub max_net_number: Option<i32>,
}

/// Service managing the singleton game control record
#[derive(Debug)]
pub struct GameControlService<R: GameControlRepository> {
    repository: Arc<R>,
}

impl<R: GameControlRepository> GameControlService<R> {
    /// Create a new game control service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get the record, falling back to competition defaults before first save
    pub async fn get(&self) -> Result<GameControl, DomainError> {
        Ok(self.repository.get().await?.unwrap_or_default())
    }

    /// Create the record with defaults if none exists yet
    pub async fn ensure_exists(&self) -> Result<GameControl, DomainError> {
        if let Some(control) = self.repository.get().await? {
            return Ok(control);
        }

        let control = GameControl::new();
        let saved = self.repository.save(&control).await?;
        tracing::info!("Created game control record with defaults");
        Ok(saved)
    }

    /// Apply a full-record update after validating all fields
    ///
    /// Validation failures leave the stored record untouched.
    pub async fn update(
        &self,
        request: UpdateGameControlRequest,
    ) -> Result<GameControl, DomainError> {
        let mut control = self.get().await?;

        control
            .set_tick_duration_secs(request.tick_duration_secs)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        control
            .set_valid_ticks(request.valid_ticks)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        control
            .set_schedule(request.services_public, request.start, request.end)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        control
            .set_net_number_range(request.min_net_number, request.max_net_number)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        control.set_registration_open(request.registration_open);
        control.set_registration_confirm_text(request.registration_confirm_text);

        let saved = self.repository.save(&control).await?;

        tracing::info!(
            tick_duration_secs = saved.tick_duration_secs(),
            registration_open = saved.registration_open(),
            "Updated game control settings"
        );

        Ok(saved)
    }
}
