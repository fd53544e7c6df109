//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::team::{Team, TeamQuery, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

const TEAM_COLUMNS: &str =
    "user_id, informal_email, affiliation, country, nop_team, net_number, created_at, updated_at";

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM teams WHERE user_id = $1",
            TEAM_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_team(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO teams (user_id, informal_email, affiliation, country, nop_team,
                               net_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(team.user_id().as_str())
        .bind(team.informal_email())
        .bind(team.affiliation())
        .bind(team.country())
        .bind(team.nop_team())
        .bind(team.net_number())
        .bind(team.created_at())
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Team for user '{}' already exists",
                    team.user_id().as_str()
                ))
            } else if msg.contains("foreign key") {
                DomainError::not_found(format!(
                    "User '{}' not found",
                    team.user_id().as_str()
                ))
            } else {
                DomainError::storage(format!("Failed to create team: {}", e))
            }
        })?;

        Ok(team)
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET informal_email = $2, affiliation = $3, country = $4, nop_team = $5,
                net_number = $6, updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(team.user_id().as_str())
        .bind(team.informal_email())
        .bind(team.affiliation())
        .bind(team.country())
        .bind(team.nop_team())
        .bind(team.net_number())
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update team: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Team for user '{}' not found",
                team.user_id().as_str()
            )));
        }

        Ok(team.clone())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM teams
            WHERE ($1::boolean IS NULL OR nop_team = $1)
            ORDER BY user_id
            LIMIT $2 OFFSET $3
            "#,
            TEAM_COLUMNS
        ))
        .bind(query.nop_team)
        .bind(query.limit.map(|l| l as i64))
        .bind(query.offset.unwrap_or(0) as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        let mut teams = Vec::with_capacity(rows.len());

        for row in rows {
            teams.push(row_to_team(&row)?);
        }

        Ok(teams)
    }

    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM teams WHERE ($1::boolean IS NULL OR nop_team = $1)",
        )
        .bind(query.nop_team)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to count teams: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let user_id: String = row.get("user_id");
    let informal_email: String = row.get("informal_email");
    let affiliation: Option<String> = row.get("affiliation");
    let country: String = row.get("country");
    let nop_team: bool = row.get("nop_team");
    let net_number: Option<i32> = row.get("net_number");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let user_id = UserId::new(&user_id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

    Ok(Team::restore(
        user_id,
        informal_email,
        affiliation,
        country,
        nop_team,
        net_number,
        created_at,
        updated_at,
    ))
}
