//! In-memory game control repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::game_control::{GameControl, GameControlRepository};
use crate::domain::DomainError;
use crate::infrastructure::memory::InMemoryDb;

/// In-memory implementation of GameControlRepository
#[derive(Debug)]
pub struct InMemoryGameControlRepository {
    db: Arc<InMemoryDb>,
}

impl InMemoryGameControlRepository {
    /// Create a repository on top of a shared store
    pub fn new(db: Arc<InMemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameControlRepository for InMemoryGameControlRepository {
    async fn get(&self) -> Result<Option<GameControl>, DomainError> {
        Ok(self.db.game_control.read().await.clone())
    }

    async fn save(&self, control: &GameControl) -> Result<GameControl, DomainError> {
        *self.db.game_control.write().await = Some(control.clone());
        Ok(control.clone())
    }
}
