//! CTF Gameserver admin API
//!
//! Administrative interface for an attack/defense CTF gameserver:
//! - Game control: competition schedule, tick timing and registration
//! - User accounts with Django-style permission flags
//! - Team records registered one-to-one with user accounts

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::{AppState, GameControlServiceTrait, TeamServiceTrait, UserServiceTrait};
use domain::user::UserQuery;
use infrastructure::auth::{generate_admin_token, AdminTokenVerifier};
use infrastructure::game_control::{
    GameControlService, InMemoryGameControlRepository, PostgresGameControlRepository,
};
use infrastructure::memory::InMemoryDb;
use infrastructure::team::{InMemoryTeamRepository, PostgresTeamRepository, TeamService};
use infrastructure::user::{
    generate_password, Argon2Hasher, CreateUserRequest, InMemoryUserRepository,
    PostgresUserRepository, UserAdminService,
};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let use_postgres = config.storage.backend.eq_ignore_ascii_case("postgres");
    info!("Storage backend: {}", config.storage.backend);

    let (game_control_service, user_service, team_service): (
        Arc<dyn GameControlServiceTrait>,
        Arc<dyn UserServiceTrait>,
        Arc<dyn TeamServiceTrait>,
    ) = if use_postgres {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        info!("Connecting to PostgreSQL...");
        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
        info!("PostgreSQL connection established");

        infrastructure::migrations::run_schema_migrations(&pool).await?;

        let game_control_repo = Arc::new(PostgresGameControlRepository::new(pool.clone()));
        let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
        let team_repo = Arc::new(PostgresTeamRepository::new(pool));

        let game_control_service = GameControlService::new(game_control_repo);
        game_control_service.ensure_exists().await?;

        (
            Arc::new(game_control_service),
            Arc::new(UserAdminService::new(
                user_repo,
                team_repo.clone(),
                Arc::new(Argon2Hasher::new()),
            )),
            Arc::new(TeamService::new(team_repo)),
        )
    } else {
        let db = InMemoryDb::new();

        let game_control_repo = Arc::new(InMemoryGameControlRepository::new(db.clone()));
        let user_repo = Arc::new(InMemoryUserRepository::new(db.clone()));
        let team_repo = Arc::new(InMemoryTeamRepository::new(db));

        let game_control_service = GameControlService::new(game_control_repo);
        game_control_service.ensure_exists().await?;

        (
            Arc::new(game_control_service),
            Arc::new(UserAdminService::new(
                user_repo,
                team_repo.clone(),
                Arc::new(Argon2Hasher::new()),
            )),
            Arc::new(TeamService::new(team_repo)),
        )
    };

    create_initial_superuser(user_service.as_ref()).await?;

    let admin_token = create_admin_token_verifier(config)?;

    Ok(AppState::new(
        game_control_service,
        user_service,
        team_service,
        admin_token,
        config.site.competition_name.as_str(),
    ))
}

/// Build the admin token verifier from config, environment or a generated token
fn create_admin_token_verifier(config: &AppConfig) -> anyhow::Result<AdminTokenVerifier> {
    let token = config
        .auth
        .admin_token
        .clone()
        .or_else(|| std::env::var("ADMIN_TOKEN").ok())
        .unwrap_or_else(|| {
            let token = generate_admin_token();
            info!("===========================================");
            info!("No admin token configured, generated one:");
            info!("Admin token: {}", token);
            info!("Set ADMIN_TOKEN to keep it across restarts.");
            info!("===========================================");
            token
        });

    Ok(AdminTokenVerifier::new(&token)?)
}

/// Create an initial superuser if no users exist
async fn create_initial_superuser(user_service: &dyn UserServiceTrait) -> anyhow::Result<()> {
    if user_service.count(&UserQuery::new()).await? > 0 {
        return Ok(());
    }

    // Use ADMIN_DEFAULT_PASSWORD env var if set, otherwise generate one
    let (password, is_default) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, true),
        _ => (generate_password(16), false),
    };

    let request = CreateUserRequest {
        id: "admin".to_string(),
        username: "admin".to_string(),
        email: "admin@example.org".to_string(),
        password: password.clone(),
        is_staff: true,
        is_superuser: true,
        team: None,
    };

    user_service.create(request).await?;

    info!("===========================================");
    info!("Initial superuser created!");
    info!("Username: admin");

    if is_default {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }

    info!("Please change this password after first login.");
    info!("===========================================");

    Ok(())
}
