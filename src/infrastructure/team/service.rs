//! Team administration service
//!
//! Team creation and editing go through the user service's inline submit;
//! this service covers the standalone read and delete operations.

use std::sync::Arc;

use crate::domain::team::{Team, TeamQuery, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Team administration service
#[derive(Debug)]
pub struct TeamService<T: TeamRepository> {
    repository: Arc<T>,
}

impl<T: TeamRepository> TeamService<T> {
    /// Create a new team service
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    /// Get the team registered for a user
    pub async fn get_by_user(&self, user_id: &str) -> Result<Option<Team>, DomainError> {
        let user_id =
            UserId::new(user_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.get_by_user(&user_id).await
    }

    /// List teams matching a query
    pub async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        self.repository.list(query).await
    }

    /// Count teams matching a query
    pub async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
        self.repository.count(query).await
    }

    /// Delete the team registered for a user, keeping the account itself
    pub async fn delete_by_user(&self, user_id: &str) -> Result<bool, DomainError> {
        let user_id =
            UserId::new(user_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let deleted = self.repository.delete_by_user(&user_id).await?;

        if deleted {
            tracing::info!(user_id = %user_id, "Deleted team");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;
    use crate::infrastructure::memory::InMemoryDb;
    use crate::infrastructure::team::repository::InMemoryTeamRepository;

    async fn create_service_with_team(user_id: &str) -> TeamService<InMemoryTeamRepository> {
        let db = InMemoryDb::new();

        let id = UserId::new(user_id).unwrap();
        let user = User::new(id.clone(), "testuser", "u@example.com", "hash").unwrap();
        db.users.write().await.insert(user_id.to_string(), user);

        let repo = InMemoryTeamRepository::new(db);
        let team = Team::new(id, "team@example.com", "Germany").unwrap();
        repo.create(team).await.unwrap();

        TeamService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_get_by_user() {
        let service = create_service_with_team("user-1").await;

        let team = service.get_by_user("user-1").await.unwrap();
        assert!(team.is_some());
        assert_eq!(team.unwrap().country(), "Germany");

        let missing = service.get_by_user("user-2").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_invalid_id() {
        let service = create_service_with_team("user-1").await;

        assert!(service.get_by_user("-bad-").await.is_err());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let service = create_service_with_team("user-1").await;

        let teams = service.list(&TeamQuery::new()).await.unwrap();
        assert_eq!(teams.len(), 1);

        let count = service.count(&TeamQuery::new()).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_delete_by_user() {
        let service = create_service_with_team("user-1").await;

        let deleted = service.delete_by_user("user-1").await.unwrap();
        assert!(deleted);

        let team = service.get_by_user("user-1").await.unwrap();
        assert!(team.is_none());

        let deleted_again = service.delete_by_user("user-1").await.unwrap();
        assert!(!deleted_again);
    }
}
