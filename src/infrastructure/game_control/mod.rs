//! Game control infrastructure module

mod postgres_repository;
pub(crate) mod repository;
mod service;

pub use postgres_repository::PostgresGameControlRepository;
pub use repository::InMemoryGameControlRepository;
pub use service::{GameControlService, UpdateGameControlRequest};
