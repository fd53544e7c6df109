//! Infrastructure layer - storage backends, services and ambient plumbing

pub mod auth;
pub mod game_control;
pub mod logging;
pub mod memory;
pub mod metrics;
pub mod migrations;
pub mod team;
pub mod user;
