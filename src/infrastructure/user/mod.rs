//! User infrastructure module
//!
//! This module provides implementations for user administration, including
//! password hashing with Argon2, in-memory and Postgres repositories, and the
//! user service with its inline-team semantics.

pub(crate) mod password;
mod postgres_repository;
pub(crate) mod repository;
mod service;

pub use password::{generate_password, Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{
    CreateUserRequest, InlineTeamRequest, UpdateUserRequest, UserAdminService, DEFAULT_LIST_LIMIT,
    MAX_LIST_LIMIT,
};
