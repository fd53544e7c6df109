//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserId, UserOrder, UserQuery, UserRepository, UserWithTeam};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password_hash, u.is_active, u.is_staff, \
                            u.is_superuser, u.date_joined, u.updated_at, u.last_login_at";

/// PostgreSQL implementation of UserRepository
///
/// Listings join against the teams table so team presence is computed in the
/// database instead of with a second round trip per row.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users u WHERE u.id = $1",
            USER_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users u WHERE u.username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_active, is_staff,
                               is_superuser, date_joined, updated_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.is_active())
        .bind(user.is_staff())
        .bind(user.is_superuser())
        .bind(user.date_joined())
        .bind(user.updated_at())
        .bind(user.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                if msg.contains("username") {
                    DomainError::conflict(format!(
                        "Username '{}' already exists",
                        user.username()
                    ))
                } else {
                    DomainError::conflict(format!(
                        "User with ID '{}' already exists",
                        user.id().as_str()
                    ))
                }
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, is_active = $5,
                is_staff = $6, is_superuser = $7, updated_at = $8, last_login_at = $9
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.is_active())
        .bind(user.is_staff())
        .bind(user.is_superuser())
        .bind(user.updated_at())
        .bind(user.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Username '{}' already exists",
                    user.username()
                ))
            } else {
                DomainError::storage(format!("Failed to update user: {}", e))
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id().as_str()
            )));
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        // The teams table references users with ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &UserQuery) -> Result<Vec<UserWithTeam>, DomainError> {
        let sql = format!(
            r#"
            SELECT {}, (t.user_id IS NOT NULL) AS has_team
            FROM users u
            LEFT JOIN teams t ON t.user_id = u.id
            WHERE ($1::boolean IS NULL OR u.is_active = $1)
              AND ($2::boolean IS NULL OR u.is_staff = $2)
              AND ($3::boolean IS NULL OR u.is_superuser = $3)
              AND ($4::boolean IS NULL OR (t.user_id IS NOT NULL) = $4)
              AND ($5::text IS NULL OR u.username ILIKE $5 OR u.email ILIKE $5
                   OR t.informal_email ILIKE $5 OR t.affiliation ILIKE $5
                   OR t.country ILIKE $5)
            ORDER BY {}
            LIMIT $6 OFFSET $7
            "#,
            USER_COLUMNS,
            order_clause(query),
        );

        let rows = sqlx::query(&sql)
            .bind(query.is_active)
            .bind(query.is_staff)
            .bind(query.is_superuser)
            .bind(query.has_team)
            .bind(query.search.as_ref().map(|s| format!("%{}%", s)))
            .bind(query.limit.map(|l| l as i64))
            .bind(query.offset.unwrap_or(0) as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let mut result = Vec::with_capacity(rows.len());

        for row in rows {
            let has_team: bool = row.get("has_team");
            result.push(UserWithTeam {
                user: row_to_user(&row)?,
                has_team,
            });
        }

        Ok(result)
    }

    async fn count(&self, query: &UserQuery) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM users u
            LEFT JOIN teams t ON t.user_id = u.id
            WHERE ($1::boolean IS NULL OR u.is_active = $1)
              AND ($2::boolean IS NULL OR u.is_staff = $2)
              AND ($3::boolean IS NULL OR u.is_superuser = $3)
              AND ($4::boolean IS NULL OR (t.user_id IS NOT NULL) = $4)
              AND ($5::text IS NULL OR u.username ILIKE $5 OR u.email ILIKE $5
                   OR t.informal_email ILIKE $5 OR t.affiliation ILIKE $5
                   OR t.country ILIKE $5)
            "#,
        )
        .bind(query.is_active)
        .bind(query.is_staff)
        .bind(query.is_superuser)
        .bind(query.has_team)
        .bind(query.search.as_ref().map(|s| format!("%{}%", s)))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

/// Build the ORDER BY clause from the query enum, never from caller input
fn order_clause(query: &UserQuery) -> String {
    let direction = if query.descending { "DESC" } else { "ASC" };

    match query.order_by {
        UserOrder::Username => format!("u.username {}", direction),
        UserOrder::DateJoined => format!("u.date_joined {}", direction),
        UserOrder::HasTeam => format!(
            "(t.user_id IS NOT NULL) {}, u.username {}",
            direction, direction
        ),
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: String = row.get("id");
    let username: String = row.get("username");
    let email: String = row.get("email");
    let password_hash: String = row.get("password_hash");
    let is_active: bool = row.get("is_active");
    let is_staff: bool = row.get("is_staff");
    let is_superuser: bool = row.get("is_superuser");
    let date_joined: chrono::DateTime<chrono::Utc> = row.get("date_joined");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");
    let last_login_at: Option<chrono::DateTime<chrono::Utc>> = row.get("last_login_at");

    let user_id = UserId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

    Ok(User::restore(
        user_id,
        username,
        email,
        password_hash,
        is_active,
        is_staff,
        is_superuser,
        date_joined,
        updated_at,
        last_login_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause() {
        let query = UserQuery::new();
        assert_eq!(order_clause(&query), "u.username ASC");

        let query = UserQuery::new().with_order(UserOrder::DateJoined, true);
        assert_eq!(order_clause(&query), "u.date_joined DESC");

        let query = UserQuery::new().with_order(UserOrder::HasTeam, false);
        assert_eq!(
            order_clause(&query),
            "(t.user_id IS NOT NULL) ASC, u.username ASC"
        );
    }
}
