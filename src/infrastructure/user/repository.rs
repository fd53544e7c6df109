//! In-memory user repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::user::{User, UserId, UserOrder, UserQuery, UserRepository, UserWithTeam};
use crate::domain::DomainError;
use crate::infrastructure::memory::InMemoryDb;

/// In-memory implementation of UserRepository
///
/// Shares its backing store with the team repository so listings can compute
/// team presence the same way the Postgres backend does with a join.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    db: Arc<InMemoryDb>,
}

impl InMemoryUserRepository {
    /// Create a repository on top of a shared store
    pub fn new(db: Arc<InMemoryDb>) -> Self {
        Self { db }
    }

    fn matches(query: &UserQuery, row: &UserWithTeam) -> bool {
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

        true
    }

    async fn search_matches(&self, query: &UserQuery, row: &UserWithTeam) -> bool {
        let Some(ref search) = query.search else {
            return true;
        };
        let needle = search.to_lowercase();

        if row.user.username().to_lowercase().contains(&needle)
            || row.user.email().to_lowercase().contains(&needle)
        {
            return true;
        }

        // Team columns participate in search like the joined query does
        let teams = self.db.teams.read().await;
        if let Some(team) = teams.get(row.user.id().as_str()) {
            if team.informal_email().to_lowercase().contains(&needle)
                || team.country().to_lowercase().contains(&needle)
                || team
                    .affiliation()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
            {
                return true;
            }
        }

        false
    }

    async fn matching_rows(&self, query: &UserQuery) -> Vec<UserWithTeam> {
        let candidates: Vec<UserWithTeam> = {
            let users = self.db.users.read().await;
            let teams = self.db.teams.read().await;

            users
                .values()
                .map(|u| UserWithTeam {
                    has_team: teams.contains_key(u.id().as_str()),
                    user: u.clone(),
                })
                .filter(|row| Self::matches(query, row))
                .collect()
        };

        let mut rows = Vec::with_capacity(candidates.len());
        for row in candidates {
            if self.search_matches(query, &row).await {
                rows.push(row);
            }
        }

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
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.db.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.db.users.read().await;
        Ok(users.values().find(|u| u.username() == username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.db.users.write().await;
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
        let mut users = self.db.users.write().await;
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
        let mut users = self.db.users.write().await;
        // The team record does not survive its owning account
        self.db.teams.write().await.remove(id.as_str());
        Ok(users.remove(id.as_str()).is_some())
    }

    async fn list(&self, query: &UserQuery) -> Result<Vec<UserWithTeam>, DomainError> {
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
        Ok(self.matching_rows(query).await.len())
    }
}
