//! Game control domain module
//!
//! The game control record is a singleton holding the competition schedule,
//! tick timing, and registration settings. The current tick is advanced by the
//! controller component and is read-only through the admin interface.

mod entity;
mod repository;
mod validation;

pub use entity::{
    GameControl, DEFAULT_TICK_DURATION_SECS, DEFAULT_VALID_TICKS, PRE_GAME_TICK,
};
pub use repository::GameControlRepository;
pub use validation::{
    validate_net_number_range, validate_schedule, validate_tick_duration, validate_valid_ticks,
    GameControlValidationError, MAX_TICK_DURATION_SECS, MIN_TICK_DURATION_SECS,
};
