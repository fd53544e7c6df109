//! Team repository trait

use async_trait::async_trait;

use super::entity::Team;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Query parameters for listing teams
#[derive(Debug, Clone, Default)]
pub struct TeamQuery {
    /// Filter by the NOP team flag
    pub nop_team: Option<bool>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl TeamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nop_team(mut self, nop_team: bool) -> Self {
        self.nop_team = Some(nop_team);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Repository for managing teams, keyed by the owning user
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get the team registered for a user
    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Update an existing team
    async fn update(&self, team: &Team) -> Result<Team, DomainError>;

    /// Delete the team registered for a user
    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, DomainError>;

    /// List teams ordered by username of the owning account
    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError>;

    /// Count teams matching the query
    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError>;

    /// Check if a team exists for a user
    async fn exists_for_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.get_by_user(user_id).await?.is_some())
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockTeamRepository;
    use super::*;

    fn create_test_team(user_id: &str) -> Team {
        let id = UserId::new(user_id).unwrap();
        Team::new(id, "team@example.com", "Germany").unwrap()
    }

    #[tokio::test]
    async fn test_mock_create_and_get() {
        let repo = MockTeamRepository::new();
        let team = create_test_team("user-1");

        repo.create(team).await.unwrap();

        let id = UserId::new("user-1").unwrap();
        let fetched = repo.get_by_user(&id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().country(), "Germany");
    }

    #[tokio::test]
    async fn test_mock_one_team_per_user() {
        let repo = MockTeamRepository::new();

        repo.create(create_test_team("user-1")).await.unwrap();
        let result = repo.create(create_test_team("user-1")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_delete() {
        let repo = MockTeamRepository::new();
        let id = UserId::new("user-1").unwrap();

        repo.create(create_test_team("user-1")).await.unwrap();
        assert!(repo.exists_for_user(&id).await.unwrap());

        let deleted = repo.delete_by_user(&id).await.unwrap();
        assert!(deleted);
        assert!(!repo.exists_for_user(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_list_nop_filter() {
        let repo = MockTeamRepository::new();
        let mut nop = create_test_team("user-1");
        nop.set_nop_team(true);

        repo.create(nop).await.unwrap();
        repo.create(create_test_team("user-2")).await.unwrap();

        let nops = repo
            .list(&TeamQuery::new().with_nop_team(true))
            .await
            .unwrap();
        assert_eq!(nops.len(), 1);
        assert!(nops[0].nop_team());

        let count = repo.count(&TeamQuery::new()).await.unwrap();
        assert_eq!(count, 2);
    }
}
