//! User repository trait

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

use super::entity::{User, UserId, UserWithTeam};
use crate::domain::DomainError;

/// Column to order user listings by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserOrder {
    #[default]
    Username,
    DateJoined,
    /// Orders by team presence, ties broken by username
    HasTeam,
}

/// Query parameters for listing users
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Filter by the active flag
    pub is_active: Option<bool>,
    /// Filter by the staff flag
    pub is_staff: Option<bool>,
    /// Filter by the superuser flag
    pub is_superuser: Option<bool>,
    /// Filter by whether a team record exists for the account
    pub has_team: Option<bool>,
    /// Case-insensitive substring search over username, email and team fields
    pub search: Option<String>,
    /// Column to order by
    pub order_by: UserOrder,
    /// Reverse the ordering
    pub descending: bool,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl UserQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_is_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    pub fn with_is_staff(mut self, staff: bool) -> Self {
        self.is_staff = Some(staff);
        self
    }

    pub fn with_is_superuser(mut self, superuser: bool) -> Self {
        self.is_superuser = Some(superuser);
        self
    }

    pub fn with_has_team(mut self, has_team: bool) -> Self {
        self.has_team = Some(has_team);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_order(mut self, order: UserOrder, descending: bool) -> Self {
        self.order_by = order;
        self.descending = descending;
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

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// List users matching the query, each with its computed team presence
    async fn list(&self, query: &UserQuery) -> Result<Vec<UserWithTeam>, DomainError>;

    /// Count users matching the query
    async fn count(&self, query: &UserQuery) -> Result<usize, DomainError>;

    /// Check if a user ID exists
    async fn exists(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock user repository for testing
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<HashMap<String, User>>>,
        teams: Arc<RwLock<HashSet<String>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Mark a user as having or not having a team record
        pub async fn set_has_team(&self, id: &UserId, has_team: bool) {
            let mut teams = self.teams.write().await;
            if has_team {
                teams.insert(id.as_str().to_string());
            } else {
                teams.remove(id.as_str());
            }
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

        async fn matching_rows(&self, query: &UserQuery) -> Vec<UserWithTeam> {
            let users = self.users.read().await;
            let teams = self.teams.read().await;

            let mut rows: Vec<UserWithTeam> = users
                .values()
                .map(|u| UserWithTeam {
                    has_team: teams.contains(u.id().as_str()),
                    user: u.clone(),
                })
                .filter(|row| {
                    if let Some(active) = query.is_active {
                        if row.user.is_active() != active {
                            return false;
                        }
                    }
                    if let Some(staff) = query.is_staff {
                        if row.user.is_staff() != staff {
                            return false;
                        }
                    }
                    if let Some(superuser) = query.is_superuser {
                        if row.user.is_superuser() != superuser {
                            return false;
                        }
                    }
                    if let Some(has_team) = query.has_team {
                        if row.has_team != has_team {
                            return false;
                        }
                    }
                    if let Some(ref search) = query.search {
                        let needle = search.to_lowercase();
                        if !row.user.username().to_lowercase().contains(&needle)
                            && !row.user.email().to_lowercase().contains(&needle)
                        {
                            return false;
                        }
                    }
                    true
                })
                .collect();

            rows.sort_by(|a, b| {
                let ordering = match query.order_by {
                    UserOrder::Username => a.user.username().cmp(b.user.username()),
                    UserOrder::DateJoined => a.user.date_joined().cmp(&b.user.date_joined()),
                    UserOrder::HasTeam => a
                        .has_team
                        .cmp(&b.has_team)
                        .then_with(|| a.user.username().cmp(b.user.username())),
                };
                if query.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });

            rows
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.get(id.as_str()).cloned())
        }

        async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.username() == username).cloned())
        }

        async fn create(&self, user: User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;
            let id = user.id().as_str().to_string();

            if users.contains_key(&id) {
                return Err(DomainError::conflict(format!(
                    "User with ID '{}' already exists",
                    id
                )));
            }

            if users.values().any(|u| u.username() == user.username()) {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    user.username()
                )));
            }

            users.insert(id, user.clone());
            Ok(user)
        }

        async fn update(&self, user: &User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;
            let id = user.id().as_str().to_string();

            if !users.contains_key(&id) {
                return Err(DomainError::not_found(format!("User '{}' not found", id)));
            }

            let username_taken = users
                .values()
                .any(|u| u.username() == user.username() && u.id().as_str() != id);

            if username_taken {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    user.username()
                )));
            }

            users.insert(id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;
            self.teams.write().await.remove(id.as_str());
            Ok(users.remove(id.as_str()).is_some())
        }

        async fn list(&self, query: &UserQuery) -> Result<Vec<UserWithTeam>, DomainError> {
            self.check_should_fail().await?;
            let mut rows = self.matching_rows(query).await;

            let offset = query.offset.unwrap_or(0);
            if offset < rows.len() {
                rows = rows.into_iter().skip(offset).collect();
            } else {
                rows.clear();
            }

            if let Some(limit) = query.limit {
                rows.truncate(limit);
            }

            Ok(rows)
        }

        async fn count(&self, query: &UserQuery) -> Result<usize, DomainError> {
            self.check_should_fail().await?;
            Ok(self.matching_rows(query).await.len())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn create_test_user(id: &str, username: &str) -> User {
            let user_id = UserId::new(id).unwrap();
            User::new(
                user_id,
                username,
                format!("{}@example.com", username),
                "hashed_password",
            )
            .unwrap()
        }

        #[tokio::test]
        async fn test_create_and_get() {
            let repo = MockUserRepository::new();
            let user = create_test_user("user-1", "testuser");

            repo.create(user.clone()).await.unwrap();

            let retrieved = repo.get(user.id()).await.unwrap();
            assert!(retrieved.is_some());
            assert_eq!(retrieved.unwrap().username(), user.username());
        }

        #[tokio::test]
        async fn test_username_uniqueness() {
            let repo = MockUserRepository::new();
            let user1 = create_test_user("user-1", "testuser");
            let user2 = create_test_user("user-2", "testuser");

            repo.create(user1).await.unwrap();

            let result = repo.create(user2).await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_list_has_team_filter() {
            let repo = MockUserRepository::new();
            let with_team = create_test_user("user-1", "alpha");
            let without_team = create_test_user("user-2", "bravo");

            repo.create(with_team.clone()).await.unwrap();
            repo.create(without_team.clone()).await.unwrap();
            repo.set_has_team(with_team.id(), true).await;

            let rows = repo
                .list(&UserQuery::new().with_has_team(true))
                .await
                .unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].user.username(), "alpha");
            assert!(rows[0].has_team);

            let rows = repo
                .list(&UserQuery::new().with_has_team(false))
                .await
                .unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].user.username(), "bravo");
            assert!(!rows[0].has_team);
        }

        #[tokio::test]
        async fn test_list_orders_by_username() {
            let repo = MockUserRepository::new();

            repo.create(create_test_user("user-1", "charlie"))
                .await
                .unwrap();
            repo.create(create_test_user("user-2", "alpha")).await.unwrap();
            repo.create(create_test_user("user-3", "bravo")).await.unwrap();

            let rows = repo.list(&UserQuery::new()).await.unwrap();
            let usernames: Vec<&str> = rows.iter().map(|r| r.user.username()).collect();
            assert_eq!(usernames, vec!["alpha", "bravo", "charlie"]);
        }

        #[tokio::test]
        async fn test_list_orders_by_has_team() {
            let repo = MockUserRepository::new();
            let with_team = create_test_user("user-1", "alpha");

            repo.create(with_team.clone()).await.unwrap();
            repo.create(create_test_user("user-2", "bravo")).await.unwrap();
            repo.set_has_team(with_team.id(), true).await;

            let query = UserQuery::new().with_order(UserOrder::HasTeam, true);
            let rows = repo.list(&query).await.unwrap();
            assert!(rows[0].has_team);
            assert!(!rows[1].has_team);
        }

        #[tokio::test]
        async fn test_search_matches_email() {
            let repo = MockUserRepository::new();

            repo.create(create_test_user("user-1", "alpha")).await.unwrap();
            repo.create(create_test_user("user-2", "bravo")).await.unwrap();

            let rows = repo
                .list(&UserQuery::new().with_search("ALPHA@"))
                .await
                .unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].user.username(), "alpha");
        }

        #[tokio::test]
        async fn test_count_with_filters() {
            let repo = MockUserRepository::new();
            let mut staff = create_test_user("user-1", "alpha");
            staff.set_staff(true);

            repo.create(staff).await.unwrap();
            repo.create(create_test_user("user-2", "bravo")).await.unwrap();

            let count = repo
                .count(&UserQuery::new().with_is_staff(true))
                .await
                .unwrap();
            assert_eq!(count, 1);
        }
    }
}
