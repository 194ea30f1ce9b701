// ABOUTME: User management database operations for token authentication
// ABOUTME: Handles account creation, password reset, lookup by username, and login tracking

use super::{Database, StoreError};
use chrono::Utc;
use recipe_core::models::User;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        last_login: row.try_get("last_login")?,
    })
}

impl Database {
    /// Create users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                last_login TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_is_active ON users(is_active)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create an active user
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the username is taken
    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let row = sqlx::query(
            r"
            INSERT INTO users (username, password_hash, is_active, created_at)
            VALUES ($1, $2, 1, $3)
            RETURNING id, username, password_hash, is_active, created_at, last_login
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::unique_on("username"))?;

        Ok(user_from_row(&row)?)
    }

    /// Replace a user's password hash and reactivate the account
    ///
    /// Returns `false` when no such user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn reset_user_password(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let updated = sqlx::query(
            "UPDATE users SET password_hash = $2, is_active = 1 WHERE username = $1",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    /// Enable or disable an account
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn set_user_active(&self, username: &str, active: bool) -> Result<bool, StoreError> {
        let updated = sqlx::query("UPDATE users SET is_active = $2 WHERE username = $1")
            .bind(username)
            .bind(active)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    /// Look a user up by login name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r"
            SELECT id, username, password_hash, is_active, created_at, last_login
            FROM users WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    /// Record a successful login
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_last_login(&self, user_id: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(user_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
