//! Team domain module
//!
//! A team is registered one-to-one with a user account and carries the
//! competition-facing details: contact address, affiliation, country, the NOP
//! team flag and an optional explicitly assigned net number.

mod entity;
mod repository;
mod validation;

pub use entity::Team;
pub use repository::{TeamQuery, TeamRepository};
pub use validation::{
    validate_affiliation, validate_contact_email, validate_country, validate_net_number,
    TeamValidationError,
};
