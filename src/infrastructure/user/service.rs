//! User administration service

use std::sync::Arc;

use crate::domain::team::{Team, TeamRepository};
use crate::domain::user::{
    validate_email, validate_password, validate_username, User, UserId, UserQuery, UserRepository,
    UserWithTeam,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Default page size for user listings
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Upper bound on requested page sizes
pub const MAX_LIST_LIMIT: usize = 1000;

/// Team details submitted inline with a user
#[derive(Debug, Clone)]
pub struct InlineTeamRequest {
    pub informal_email: String,
    pub affiliation: Option<String>,
    pub country: String,
    pub nop_team: bool,
    pub net_number: Option<i32>,
}

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub team: Option<InlineTeamRequest>,
}

/// Request for updating a user, applied as a full-record submit
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    /// New password, unchanged when absent
    pub password: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Inline team details, created or updated when present
    pub team: Option<InlineTeamRequest>,
    /// Delete the team record for this user
    pub remove_team: bool,
}

/// User administration service
///
/// Owns the inline-team semantics: a user and its optional team record are
/// managed through a single submit, like an admin form with an inline.
#[derive(Debug)]
pub struct UserAdminService<R: UserRepository, T: TeamRepository, H: PasswordHasher> {
    users: Arc<R>,
    teams: Arc<T>,
    hasher: Arc<H>,
}

impl<R: UserRepository, T: TeamRepository, H: PasswordHasher> UserAdminService<R, T, H> {
    /// Create a new user administration service
    pub fn new(users: Arc<R>, teams: Arc<T>, hasher: Arc<H>) -> Self {
        Self {
            users,
            teams,
            hasher,
        }
    }

    /// Create a new user, optionally with an inline team record
    pub async fn create(&self, request: CreateUserRequest) -> Result<UserWithTeam, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        let user_id =
            UserId::new(&request.id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if self.users.username_exists(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let mut user = User::new(user_id, &request.username, &request.email, password_hash)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        user.set_staff(request.is_staff);
        user.set_superuser(request.is_superuser);

        let user = self.users.create(user).await?;

        let team = match request.team {
            Some(inline) => Some(self.create_team(user.id().clone(), inline).await?),
            None => None,
        };

        tracing::info!(user_id = %user.id(), username = %user.username(), "Created user");

        Ok(UserWithTeam {
            has_team: team.is_some(),
            user,
        })
    }

    /// Update a user and its inline team record
    pub async fn update(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserWithTeam, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut user = self
            .users
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;

        if request.username != user.username()
            && self.users.username_exists(&request.username).await?
        {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        user.set_username(&request.username)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        user.set_email(&request.email);
        user.set_active(request.is_active);
        user.set_staff(request.is_staff);
        user.set_superuser(request.is_superuser);

        if let Some(ref password) = request.password {
            validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;
            let hash = self.hasher.hash(password)?;
            user.set_password_hash(hash);
        }

        if request.remove_team && request.team.is_some() {
            return Err(DomainError::validation(
                "Cannot submit team details and remove the team in the same request",
            ));
        }

        let user = self.users.update(&user).await?;

        let has_team = if request.remove_team {
            self.teams.delete_by_user(user.id()).await?;
            false
        } else if let Some(inline) = request.team {
            self.upsert_team(user.id().clone(), inline).await?;
            true
        } else {
            self.teams.exists_for_user(user.id()).await?
        };

        tracing::info!(user_id = %user.id(), "Updated user");

        Ok(UserWithTeam { user, has_team })
    }

    /// Get a user with its team presence
    pub async fn get(&self, id: &str) -> Result<Option<UserWithTeam>, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let Some(user) = self.users.get(&user_id).await? else {
            return Ok(None);
        };

        let has_team = self.teams.exists_for_user(&user_id).await?;
        Ok(Some(UserWithTeam { user, has_team }))
    }

    /// List users matching a query, with the listing page size clamped
    pub async fn list(&self, mut query: UserQuery) -> Result<Vec<UserWithTeam>, DomainError> {
        let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
        query.limit = Some(limit);

        self.users.list(&query).await
    }

    /// Count users matching a query
    pub async fn count(&self, query: &UserQuery) -> Result<usize, DomainError> {
        self.users.count(query).await
    }

    /// Delete a user, dropping its team record with it
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let deleted = self.users.delete(&user_id).await?;

        if deleted {
            tracing::info!(user_id = %user_id, "Deleted user");
        }

        Ok(deleted)
    }

    async fn create_team(
        &self,
        user_id: UserId,
        inline: InlineTeamRequest,
    ) -> Result<Team, DomainError> {
        let mut team = Team::new(user_id, inline.informal_email, inline.country)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        team.set_affiliation(inline.affiliation)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        team.set_nop_team(inline.nop_team);
        team.set_net_number(inline.net_number)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.teams.create(team).await
    }

    async fn upsert_team(
        &self,
        user_id: UserId,
        inline: InlineTeamRequest,
    ) -> Result<Team, DomainError> {
        match self.teams.get_by_user(&user_id).await? {
            Some(mut team) => {
                team.set_informal_email(inline.informal_email)
                    .map_err(|e| DomainError::validation(e.to_string()))?;
                team.set_affiliation(inline.affiliation)
                    .map_err(|e| DomainError::validation(e.to_string()))?;
                team.set_country(inline.country)
                    .map_err(|e| DomainError::validation(e.to_string()))?;
                team.set_nop_team(inline.nop_team);
                team.set_net_number(inline.net_number)
                    .map_err(|e| DomainError::validation(e.to_string()))?;

                self.teams.update(&team).await
            }
            None => self.create_team(user_id, inline).await,
        }
    }
}
