//! Team infrastructure module

mod postgres_repository;
pub(crate) mod repository;
mod service;

pub use postgres_repository::PostgresTeamRepository;
pub use repository::InMemoryTeamRepository;
pub use service::TeamService;
