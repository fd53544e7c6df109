//! User management admin endpoints
//!
//! The list endpoint mirrors the admin changelist: filters on the account
//! flags and on team presence, free-text search across user and team
//! columns, and sortable columns including the computed has-team flag.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::admin::teams::TeamResponse;
use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{UserOrder, UserQuery, UserWithTeam};
use crate::infrastructure::user::{CreateUserRequest, InlineTeamRequest, UpdateUserRequest};

/// Team details submitted inline with a user
#[derive(Debug, Clone, Deserialize)]
pub struct InlineTeamApiRequest {
    pub informal_email: String,
    #[serde(default)]
    pub affiliation: Option<String>,
    pub country: String,
    #[serde(default)]
    pub nop_team: bool,
    #[serde(default)]
    pub net_number: Option<i32>,
}

impl From<InlineTeamApiRequest> for InlineTeamRequest {
    fn from(request: InlineTeamApiRequest) -> Self {
        Self {
            informal_email: request.informal_email,
            affiliation: request.affiliation,
            country: request.country,
            nop_team: request.nop_team,
            net_number: request.net_number,
        }
    }
}

/// Request to create a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub team: Option<InlineTeamApiRequest>,
}

/// Request to update a user
///
/// Carries the full editable record, like a submitted change form. Omitted
/// booleans fall back to their form defaults rather than the stored values.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserApiRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub team: Option<InlineTeamApiRequest>,
    #[serde(default)]
    pub remove_team: bool,
}

fn default_is_active() -> bool {
    true
}

/// User response for admin API
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub has_team: bool,
    pub date_joined: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

impl From<&UserWithTeam> for UserResponse {
    fn from(record: &UserWithTeam) -> Self {
        let user = &record.user;
        Self {
            id: user.id().as_str().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            is_active: user.is_active(),
            is_staff: user.is_staff(),
            is_superuser: user.is_superuser(),
            has_team: record.has_team,
            date_joined: user.date_joined().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
            last_login_at: user.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Single user response including the team record, when one exists
#[derive(Debug, Clone, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub team: Option<TeamResponse>,
}

/// List users response
#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

/// Query parameters for the user changelist
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub has_team: Option<bool>,
    pub search: Option<String>,
    pub order_by: Option<UserOrder>,
    #[serde(default)]
    pub descending: bool,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

fn build_user_query(params: &ListUsersParams) -> UserQuery {
    let mut query = UserQuery::new();

    if let Some(active) = params.is_active {
        query = query.with_is_active(active);
    }
    if let Some(staff) = params.is_staff {
        query = query.with_is_staff(staff);
    }
    if let Some(superuser) = params.is_superuser {
        query = query.with_is_superuser(superuser);
    }
    if let Some(has_team) = params.has_team {
        query = query.with_has_team(has_team);
    }
    if let Some(ref search) = params.search {
        if !search.trim().is_empty() {
            query = query.with_search(search.trim());
        }
    }
    if let Some(order) = params.order_by {
        query = query.with_order(order, params.descending);
    } else if params.descending {
        query = query.with_order(UserOrder::default(), true);
    }
    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }
    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    query
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!(
        has_team = ?params.has_team,
        search = ?params.search,
        "Admin listing users"
    );

    let query = build_user_query(&params);

    // Total ignores paging so clients can build page links
    let total = state
        .user_service
        .count(&query)
        .await
        .map_err(ApiError::from)?;

    let users = state
        .user_service
        .list(query)
        .await
        .map_err(ApiError::from)?;

    let users = users.iter().map(UserResponse::from).collect();

    Ok(Json(ListUsersResponse { users, total }))
}

/// POST /admin/users
pub async fn create_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    debug!(user_id = %request.id, username = %request.username, "Admin creating user");

    let create_request = CreateUserRequest {
        id: request.id,
        username: request.username,
        email: request.email,
        password: request.password,
        is_staff: request.is_staff,
        is_superuser: request.is_superuser,
        team: request.team.map(InlineTeamRequest::from),
    };

    let record = state
        .user_service
        .create(create_request)
        .await
        .map_err(ApiError::from)?;

    user_detail(&state, record).await
}

/// GET /admin/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    debug!(user_id = %user_id, "Admin getting user");

    let record = state
        .user_service
        .get(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    user_detail(&state, record).await
}

/// PUT /admin/users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    debug!(user_id = %user_id, "Admin updating user");

    let update_request = UpdateUserRequest {
        username: request.username,
        email: request.email,
        password: request.password,
        is_active: request.is_active,
        is_staff: request.is_staff,
        is_superuser: request.is_superuser,
        team: request.team.map(InlineTeamRequest::from),
        remove_team: request.remove_team,
    };

    let record = state
        .user_service
        .update(&user_id, update_request)
        .await
        .map_err(ApiError::from)?;

    user_detail(&state, record).await
}

/// DELETE /admin/users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(user_id = %user_id, "Admin deleting user");

    let deleted = state
        .user_service
        .delete(&user_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "User '{}' not found",
            user_id
        )));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": user_id
    })))
}

async fn user_detail(
    state: &AppState,
    record: UserWithTeam,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let team = if record.has_team {
        state
            .team_service
            .get_by_user(record.user.id().as_str())
            .await
            .map_err(ApiError::from)?
    } else {
        None
    };

    Ok(Json(UserDetailResponse {
        user: UserResponse::from(&record),
        team: team.as_ref().map(TeamResponse::from),
    }))
}
