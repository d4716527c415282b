//! User repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use super::UserStore;
use crate::models::{Role, User, UserChanges};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> DatabaseResult<User> {
    let role: Option<String> = row.try_get("role")?;
    // Column default is 'admin'; a NULL only shows up in hand-edited rows
    let role = match role {
        Some(role) => role
            .parse::<Role>()
            .map_err(|e| DatabaseError::Decode(e.to_string()))?,
        None => Role::Admin,
    };

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        name: row.try_get("name")?,
        password_hash: row.try_get("password")?,
        role,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, name, password, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, name, password, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn list(&self) -> DatabaseResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, name, password, role, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(user_from_row).collect()
    }

    async fn insert(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> DatabaseResult<User> {
        info!("Creating new user: {}", username);

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, name, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, name, password, role, created_at
            "#,
        )
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;

        user_from_row(&row)
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> DatabaseResult<()> {
        info!("Updating user: {}", id);

        sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($1, username),
                name = COALESCE($2, name),
                password = COALESCE($3, password),
                role = COALESCE($4, role)
            WHERE id = $5
            "#,
        )
        .bind(changes.username.as_deref())
        .bind(changes.name.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(changes.role.map(|role| role.as_str()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> DatabaseResult<()> {
        info!("Deleting user: {}", id);

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
