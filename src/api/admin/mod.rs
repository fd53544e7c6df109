//! Admin API endpoints for managing the competition

pub mod game_control;
pub mod site;
pub mod teams;
pub mod users;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // Game control singleton
        .route("/game-control", get(game_control::get_game_control))
        .route("/game-control", put(game_control::update_game_control))
        // User management
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}", put(users::update_user))
        .route("/users/{user_id}", delete(users::delete_user))
        // Team records (managed inline through users, read and delete here)
        .route("/teams", get(teams::list_teams))
        .route("/teams/{user_id}", get(teams::get_team))
        .route("/teams/{user_id}", delete(teams::delete_team))
        // Site branding
        .route("/site", get(site::get_site_info))
}
