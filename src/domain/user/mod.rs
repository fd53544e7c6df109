//! User domain module
//!
//! User accounts carry the Django-style permission flags: active accounts may
//! log in, staff accounts may use the admin interface, superusers hold all
//! permissions. A team record may exist for a user but is optional.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId, UserWithTeam};
pub use repository::{UserOrder, UserQuery, UserRepository};
pub use validation::{
    validate_email, validate_password, validate_user_id, validate_username, UserValidationError,
};
