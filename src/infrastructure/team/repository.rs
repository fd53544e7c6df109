//! In-memory team repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::team::{Team, TeamQuery, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::memory::InMemoryDb;

/// In-memory implementation of TeamRepository
#[derive(Debug)]
pub struct InMemoryTeamRepository {
    db: Arc<InMemoryDb>,
}

impl InMemoryTeamRepository {
    /// Create a repository on top of a shared store
    pub fn new(db: Arc<InMemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<Team>, DomainError> {
        let teams = self.db.teams.read().await;
        Ok(teams.get(user_id.as_str()).cloned())
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let key = team.user_id().as_str().to_string();

        if !self.db.users.read().await.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                key
            )));
        }

        let mut teams = self.db.teams.write().await;

        if teams.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Team for user '{}' already exists",
                key
            )));
        }

        teams.insert(key, team.clone());
        Ok(team)
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        let mut teams = self.db.teams.write().await;
        let key = team.user_id().as_str().to_string();

        if !teams.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Team for user '{}' not found",
                key
            )));
        }

        teams.insert(key, team.clone());
        Ok(team.clone())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let mut teams = self.db.teams.write().await;
        Ok(teams.remove(user_id.as_str()).is_some())
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let teams = self.db.teams.read().await;
        let mut result: Vec<Team> = teams.values().cloned().collect();

        if let Some(nop) = query.nop_team {
            result.retain(|t| t.nop_team() == nop);
        }

        result.sort_by(|a, b| a.user_id().as_str().cmp(b.user_id().as_str()));

        let offset = query.offset.unwrap_or(0);
        if offset < result.len() {
            result = result.into_iter().skip(offset).collect();
        } else {
            result.clear();
        }

        if let Some(limit) = query.limit {
            result.truncate(limit);
        }

        Ok(result)
    }

    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
        let teams = self.db.teams.read().await;

        let count = teams
            .values()
            .filter(|t| {
                if let Some(nop) = query.nop_team {
                    t.nop_team() == nop
                } else {
                    true
                }
            })
            .count();

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;

    async fn db_with_user(user_id: &str) -> Arc<InMemoryDb> {
        let db = InMemoryDb::new();
        let id = UserId::new(user_id).unwrap();
        let user = User::new(id, format!("u-{}", user_id), "u@example.com", "hash").unwrap();
        db.users
            .write()
            .await
            .insert(user_id.to_string(), user);
        db
    }

    fn create_test_team(user_id: &str) -> Team {
        let id = UserId::new(user_id).unwrap();
        Team::new(id, "team@example.com", "Germany").unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = db_with_user("user-1").await;
        let repo = InMemoryTeamRepository::new(db);

        repo.create(create_test_team("user-1")).await.unwrap();

        let id = UserId::new("user-1").unwrap();
        let team = repo.get_by_user(&id).await.unwrap();
        assert!(team.is_some());
        assert_eq!(team.unwrap().country(), "Germany");
    }

    #[tokio::test]
    async fn test_create_requires_user() {
        let repo = InMemoryTeamRepository::new(InMemoryDb::new());

        let result = repo.create(create_test_team("user-1")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_one_team_per_user() {
        let db = db_with_user("user-1").await;
        let repo = InMemoryTeamRepository::new(db);

        repo.create(create_test_team("user-1")).await.unwrap();

        let result = repo.create(create_test_team("user-1")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update() {
        let db = db_with_user("user-1").await;
        let repo = InMemoryTeamRepository::new(db);
        let id = UserId::new("user-1").unwrap();

        repo.create(create_test_team("user-1")).await.unwrap();

        let mut team = repo.get_by_user(&id).await.unwrap().unwrap();
        team.set_country("Austria").unwrap();
        repo.update(&team).await.unwrap();

        let fetched = repo.get_by_user(&id).await.unwrap().unwrap();
        assert_eq!(fetched.country(), "Austria");
    }

    #[tokio::test]
    async fn test_delete() {
        let db = db_with_user("user-1").await;
        let repo = InMemoryTeamRepository::new(db);
        let id = UserId::new("user-1").unwrap();

        repo.create(create_test_team("user-1")).await.unwrap();
        assert!(repo.exists_for_user(&id).await.unwrap());

        let deleted = repo.delete_by_user(&id).await.unwrap();
        assert!(deleted);
        assert!(!repo.exists_for_user(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let db = db_with_user("user-1").await;
        {
            let id = UserId::new("user-2").unwrap();
            let user = User::new(id, "u-user-2", "u2@example.com", "hash").unwrap();
            db.users.write().await.insert("user-2".to_string(), user);
        }
        let repo = InMemoryTeamRepository::new(db);

        let mut nop = create_test_team("user-1");
        nop.set_nop_team(true);
        repo.create(nop).await.unwrap();
        repo.create(create_test_team("user-2")).await.unwrap();

        let all = repo.list(&TeamQuery::new()).await.unwrap();
        assert_eq!(all.len(), 2);

        let nops = repo
            .list(&TeamQuery::new().with_nop_team(true))
            .await
            .unwrap();
        assert_eq!(nops.len(), 1);

        let count = repo.count(&TeamQuery::new()).await.unwrap();
        assert_eq!(count, 2);
    }
}
