//! Database migrations infrastructure
//!
//! Applied migrations are tracked in a `_migrations` table so startup can
//! run the list idempotently.

use sqlx::postgres::PgPool;

use crate::domain::DomainError;

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version, ascending
    pub version: i64,
    /// Human-readable description
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
}

impl Migration {
    pub fn new(version: i64, description: impl Into<String>, up: impl Into<String>) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
        }
    }
}

/// PostgreSQL migrator tracking applied versions
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    /// Runs a single migration
    pub async fn run_migration(&self, migration: &Migration) -> Result<(), DomainError> {
        self.ensure_migrations_table().await?;

        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)",
        )
        .bind(migration.version)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))?;

        if applied {
            return Ok(());
        }

        sqlx::query(&migration.up)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        Ok(())
    }
}

/// Collection of schema migrations
pub fn schema_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create users table",
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(50) PRIMARY KEY,
                username VARCHAR(150) NOT NULL UNIQUE,
                email VARCHAR(254) NOT NULL,
                password_hash TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                is_staff BOOLEAN NOT NULL DEFAULT FALSE,
                is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
                date_joined TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                last_login_at TIMESTAMPTZ
            );
            CREATE INDEX IF NOT EXISTS idx_users_date_joined ON users(date_joined);
            "#,
        ),
        Migration::new(
            2,
            "Create teams table",
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                user_id VARCHAR(50) PRIMARY KEY
                    REFERENCES users(id) ON DELETE CASCADE,
                informal_email VARCHAR(254) NOT NULL,
                affiliation VARCHAR(100),
                country VARCHAR(100) NOT NULL,
                nop_team BOOLEAN NOT NULL DEFAULT FALSE,
                net_number INTEGER,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
        ),
        Migration::new(
            3,
            "Create game_control table",
            r#"
            CREATE TABLE IF NOT EXISTS game_control (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                start_time TIMESTAMPTZ,
                end_time TIMESTAMPTZ,
                services_public TIMESTAMPTZ,
                tick_duration_secs INTEGER NOT NULL,
                valid_ticks INTEGER NOT NULL,
                current_tick INTEGER NOT NULL DEFAULT -1,
                registration_open BOOLEAN NOT NULL DEFAULT FALSE,
                registration_confirm_text TEXT,
                min_net_number INTEGER,
                max_net_number INTEGER,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
        ),
    ]
}

/// Runs all pending schema migrations
pub async fn run_schema_migrations(pool: &PgPool) -> Result<(), DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());

    for migration in schema_migrations() {
        migrator.run_migration(&migration).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creation() {
        let migration = Migration::new(1, "Test migration", "CREATE TABLE test");

        assert_eq!(migration.version, 1);
        assert_eq!(migration.description, "Test migration");
        assert_eq!(migration.up, "CREATE TABLE test");
    }

    #[test]
    fn test_schema_migrations_order() {
        let migrations = schema_migrations();

        assert!(!migrations.is_empty());

        for i in 1..migrations.len() {
            assert!(
                migrations[i].version > migrations[i - 1].version,
                "Migrations should be in ascending order"
            );
        }
    }

    #[test]
    fn test_schema_migrations_cover_all_tables() {
        let migrations = schema_migrations();
        let all_sql: String = migrations.iter().map(|m| m.up.as_str()).collect();

        assert!(all_sql.contains("users"));
        assert!(all_sql.contains("teams"));
        assert!(all_sql.contains("game_control"));
    }
}
