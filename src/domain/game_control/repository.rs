//! Game control repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::GameControl;
use crate::domain::DomainError;

/// Repository trait for the singleton game control record
#[async_trait]
pub trait GameControlRepository: Send + Sync + Debug {
    /// Get the game control record, if one has been created yet
    async fn get(&self) -> Result<Option<GameControl>, DomainError>;

    /// Persist the game control record, creating it on first save
    async fn save(&self, control: &GameControl) -> Result<GameControl, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock game control repository for testing
    #[derive(Debug, Default)]
    pub struct MockGameControlRepository {
        control: Arc<RwLock<Option<GameControl>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockGameControlRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl GameControlRepository for MockGameControlRepository {
        async fn get(&self) -> Result<Option<GameControl>, DomainError> {
            self.check_should_fail().await?;
            Ok(self.control.read().await.clone())
        }

        async fn save(&self, control: &GameControl) -> Result<GameControl, DomainError> {
            self.check_should_fail().await?;
            *self.control.write().await = Some(control.clone());
            Ok(control.clone())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_get_before_save() {
            let repo = MockGameControlRepository::new();
            assert!(repo.get().await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_save_and_get() {
            let repo = MockGameControlRepository::new();
            let mut control = GameControl::new();
            control.set_registration_open(true);

            repo.save(&control).await.unwrap();

            let retrieved = repo.get().await.unwrap().unwrap();
            assert!(retrieved.registration_open());
        }

        #[tokio::test]
        async fn test_save_overwrites() {
            let repo = MockGameControlRepository::new();
            let mut control = GameControl::new();

            repo.save(&control).await.unwrap();

            control.set_tick_duration_secs(120).unwrap();
            repo.save(&control).await.unwrap();

            let retrieved = repo.get().await.unwrap().unwrap();
            assert_eq!(retrieved.tick_duration_secs(), 120);
        }
    }
}
