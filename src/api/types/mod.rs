//! Shared API request/response types

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
