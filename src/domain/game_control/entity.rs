//! Game control entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_net_number_range, validate_schedule, validate_tick_duration, validate_valid_ticks,
    GameControlValidationError,
};

/// Tick the competition sits at before the first tick has started
pub const PRE_GAME_TICK: i32 = -1;

/// Default tick duration in seconds
pub const DEFAULT_TICK_DURATION_SECS: u32 = 180;

/// Default number of ticks a flag stays valid for
pub const DEFAULT_VALID_TICKS: u32 = 10;

/// Singleton record holding competition-wide scheduling and registration state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameControl {
    /// Competition start time
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<DateTime<Utc>>,
    /// Competition end time
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<DateTime<Utc>>,
    /// Time from which services are reachable for teams
    #[serde(skip_serializing_if = "Option::is_none")]
    services_public: Option<DateTime<Utc>>,
    /// Duration of one tick in seconds
    tick_duration_secs: u32,
    /// Number of ticks a flag is valid for after the one it was placed in
    valid_ticks: u32,
    /// Tick the competition is currently in, advanced by the controller only
    current_tick: i32,
    /// Whether team registration is currently open
    registration_open: bool,
    /// Text shown in registration confirmation mails
    #[serde(skip_serializing_if = "Option::is_none")]
    registration_confirm_text: Option<String>,
    /// Smallest net number handed out to teams (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    min_net_number: Option<i32>,
    /// Largest net number handed out to teams (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    max_net_number: Option<i32>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl GameControl {
    /// Create the record with competition defaults
    pub fn new() -> Self {
        let now = Utc::now();

        Self {
            start: None,
            end: None,
            services_public: None,
            tick_duration_secs: DEFAULT_TICK_DURATION_SECS,
            valid_ticks: DEFAULT_VALID_TICKS,
            current_tick: PRE_GAME_TICK,
            registration_open: false,
            registration_confirm_text: None,
            min_net_number: None,
            max_net_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild the record from stored values
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        services_public: Option<DateTime<Utc>>,
        tick_duration_secs: u32,
        valid_ticks: u32,
        current_tick: i32,
        registration_open: bool,
        registration_confirm_text: Option<String>,
        min_net_number: Option<i32>,
        max_net_number: Option<i32>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            start,
            end,
            services_public,
            tick_duration_secs,
            valid_ticks,
            current_tick,
            registration_open,
            registration_confirm_text,
            min_net_number,
            max_net_number,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn services_public(&self) -> Option<DateTime<Utc>> {
        self.services_public
    }

    pub fn tick_duration_secs(&self) -> u32 {
        self.tick_duration_secs
    }

    pub fn valid_ticks(&self) -> u32 {
        self.valid_ticks
    }

    pub fn current_tick(&self) -> i32 {
        self.current_tick
    }

    pub fn registration_open(&self) -> bool {
        self.registration_open
    }

    pub fn registration_confirm_text(&self) -> Option<&str> {
        self.registration_confirm_text.as_deref()
    }

    pub fn min_net_number(&self) -> Option<i32> {
        self.min_net_number
    }

    pub fn max_net_number(&self) -> Option<i32> {
        self.max_net_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if the competition has started yet
    pub fn competition_started(&self) -> bool {
        self.current_tick >= 0
    }

    // Mutators

    /// Replace the scheduling window after validating its ordering
    pub fn set_schedule(
        &mut self,
        services_public: Option<DateTime<Utc>>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<(), GameControlValidationError> {
        validate_schedule(services_public, start, end)?;
        self.services_public = services_public;
        self.start = start;
        self.end = end;
        self.touch();
        Ok(())
    }

    /// Update the tick duration
    pub fn set_tick_duration_secs(&mut self, secs: u32) -> Result<(), GameControlValidationError> {
        validate_tick_duration(secs)?;
        self.tick_duration_secs = secs;
        self.touch();
        Ok(())
    }

    /// Update the flag validity period
    pub fn set_valid_ticks(&mut self, ticks: u32) -> Result<(), GameControlValidationError> {
        validate_valid_ticks(ticks)?;
        self.valid_ticks = ticks;
        self.touch();
        Ok(())
    }

    /// Open or close team registration
    pub fn set_registration_open(&mut self, open: bool) {
        self.registration_open = open;
        self.touch();
    }

    /// Update the registration confirmation mail text
    pub fn set_registration_confirm_text(&mut self, text: Option<String>) {
        self.registration_confirm_text = text.filter(|t| !t.is_empty());
        self.touch();
    }

    /// Update the net number range
    pub fn set_net_number_range(
        &mut self,
        min: Option<i32>,
        max: Option<i32>,
    ) -> Result<(), GameControlValidationError> {
        validate_net_number_range(min, max)?;
        self.min_net_number = min;
        self.max_net_number = max;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for GameControl {
    fn default() -> Self {
        Self::new()
    }
}
