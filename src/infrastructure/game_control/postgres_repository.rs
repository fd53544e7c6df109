//! PostgreSQL game control repository implementation
//!
//! The table holds at most one row, enforced with a constant primary key.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::game_control::{GameControl, GameControlRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of GameControlRepository
#[derive(Debug, Clone)]
pub struct PostgresGameControlRepository {
    pool: PgPool,
}

impl PostgresGameControlRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameControlRepository for PostgresGameControlRepository {
    async fn get(&self) -> Result<Option<GameControl>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT start_time, end_time, services_public, tick_duration_secs, valid_ticks,
                   current_tick, registration_open, registration_confirm_text,
                   min_net_number, max_net_number, created_at, updated_at
            FROM game_control
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get game control: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_game_control(&row))),
            None => Ok(None),
        }
    }

    async fn save(&self, control: &GameControl) -> Result<GameControl, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO game_control (id, start_time, end_time, services_public,
                                      tick_duration_secs, valid_ticks, current_tick,
                                      registration_open, registration_confirm_text,
                                      min_net_number, max_net_number, created_at, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE
            SET start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                services_public = EXCLUDED.services_public,
                tick_duration_secs = EXCLUDED.tick_duration_secs,
                valid_ticks = EXCLUDED.valid_ticks,
                current_tick = EXCLUDED.current_tick,
                registration_open = EXCLUDED.registration_open,
                registration_confirm_text = EXCLUDED.registration_confirm_text,
                min_net_number = EXCLUDED.min_net_number,
                max_net_number = EXCLUDED.max_net_number,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(control.start())
        .bind(control.end())
        .bind(control.services_public())
        .bind(control.tick_duration_secs() as i32)
        .bind(control.valid_ticks() as i32)
        .bind(control.current_tick())
        .bind(control.registration_open())
        .bind(control.registration_confirm_text())
        .bind(control.min_net_number())
        .bind(control.max_net_number())
        .bind(control.created_at())
        .bind(control.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to save game control: {}", e)))?;

        Ok(control.clone())
    }
}

fn row_to_game_control(row: &sqlx::postgres::PgRow) -> GameControl {
    let tick_duration_secs: i32 = row.get("tick_duration_secs");
    let valid_ticks: i32 = row.get("valid_ticks");

    GameControl::restore(
        row.get("start_time"),
        row.get("end_time"),
        row.get("services_public"),
        tick_duration_secs as u32,
        valid_ticks as u32,
        row.get("current_tick"),
        row.get("registration_open"),
        row.get("registration_confirm_text"),
        row.get("min_net_number"),
        row.get("max_net_number"),
        row.get("created_at"),
        row.get("updated_at"),
    )
}
