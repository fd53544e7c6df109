//! Application state for shared services

use std::sync::Arc;

use crate::domain::game_control::{GameControl, GameControlRepository};
use crate::domain::team::{Team, TeamQuery, TeamRepository};
use crate::domain::user::{UserQuery, UserRepository, UserWithTeam};
use crate::domain::DomainError;
use crate::infrastructure::auth::AdminTokenVerifier;
use crate::infrastructure::game_control::{GameControlService, UpdateGameControlRequest};
use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::{CreateUserRequest, PasswordHasher, UpdateUserRequest, UserAdminService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub game_control_service: Arc<dyn GameControlServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub admin_token: Arc<AdminTokenVerifier>,
    pub competition_name: Arc<str>,
}

/// Trait for game control service operations
#[async_trait::async_trait]
pub trait GameControlServiceTrait: Send + Sync {
    async fn get(&self) -> Result<GameControl, DomainError>;
    async fn update(&self, request: UpdateGameControlRequest) -> Result<GameControl, DomainError>;
}

/// Trait for user administration service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<UserWithTeam>, DomainError>;
    async fn list(&self, query: UserQuery) -> Result<Vec<UserWithTeam>, DomainError>;
    async fn count(&self, query: &UserQuery) -> Result<usize, DomainError>;
    async fn create(&self, request: CreateUserRequest) -> Result<UserWithTeam, DomainError>;
    async fn update(&self, id: &str, request: UpdateUserRequest)
        -> Result<UserWithTeam, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn get_by_user(&self, user_id: &str) -> Result<Option<Team>, DomainError>;
    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError>;
    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError>;
    async fn delete_by_user(&self, user_id: &str) -> Result<bool, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R: GameControlRepository + 'static> GameControlServiceTrait for GameControlService<R> {
    async fn get(&self) -> Result<GameControl, DomainError> {
        GameControlService::get(self).await
    }

    async fn update(&self, request: UpdateGameControlRequest) -> Result<GameControl, DomainError> {
        GameControlService::update(self, request).await
    }
}

#[async_trait::async_trait]
impl<R, T, H> UserServiceTrait for UserAdminService<R, T, H>
where
    R: UserRepository + 'static,
    T: TeamRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn get(&self, id: &str) -> Result<Option<UserWithTeam>, DomainError> {
        UserAdminService::get(self, id).await
    }

    async fn list(&self, query: UserQuery) -> Result<Vec<UserWithTeam>, DomainError> {
        UserAdminService::list(self, query).await
    }

    async fn count(&self, query: &UserQuery) -> Result<usize, DomainError> {
        UserAdminService::count(self, query).await
    }

    async fn create(&self, request: CreateUserRequest) -> Result<UserWithTeam, DomainError> {
        UserAdminService::create(self, request).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserWithTeam, DomainError> {
        UserAdminService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        UserAdminService::delete(self, id).await
    }
}

#[async_trait::async_trait]
impl<T: TeamRepository + 'static> TeamServiceTrait for TeamService<T> {
    async fn get_by_user(&self, user_id: &str) -> Result<Option<Team>, DomainError> {
        TeamService::get_by_user(self, user_id).await
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self, query).await
    }

    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
        TeamService::count(self, query).await
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<bool, DomainError> {
        TeamService::delete_by_user(self, user_id).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        game_control_service: Arc<dyn GameControlServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        team_service: Arc<dyn TeamServiceTrait>,
        admin_token: AdminTokenVerifier,
        competition_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            game_control_service,
            user_service,
            team_service,
            admin_token: Arc::new(admin_token),
            competition_name: competition_name.into(),
        }
    }
}
