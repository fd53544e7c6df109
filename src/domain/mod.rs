//! Domain layer - Core business logic and entities

pub mod error;
pub mod game_control;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use game_control::{
    validate_net_number_range, validate_schedule, validate_tick_duration, validate_valid_ticks,
    GameControl, GameControlRepository, GameControlValidationError, MAX_TICK_DURATION_SECS,
    MIN_TICK_DURATION_SECS, PRE_GAME_TICK,
};
pub use team::{Team, TeamQuery, TeamRepository, TeamValidationError};
pub use user::{
    validate_email, validate_password, validate_username, User, UserId, UserOrder, UserQuery,
    UserRepository, UserValidationError, UserWithTeam,
};
