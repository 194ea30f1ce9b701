// ABOUTME: Entity store over SQLite for ingredients, recipes, their join table, and users
// ABOUTME: Owns the connection pool and runs schema migrations on connect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `Database` is the only owner of persisted state. Every mutating operation
//! runs in its own transaction, so a failed precondition (missing ingredient,
//! unknown recipe) leaves the store untouched.

mod errors;
mod ingredients;
mod recipes;
mod users;

pub use errors::StoreError;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Instant;

use crate::logging::AppLogger;

/// Database manager for recipe and user storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect and run migrations
    ///
    /// In-memory databases are pinned to a single connection that lives as
    /// long as the pool, otherwise every pooled connection would see its own
    /// empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database URL cannot be parsed
    /// - The connection cannot be established
    /// - A migration fails
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {database_url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {database_url}"))?;

        let db = Self { pool };
        db.migrate().await.context("Database migration failed")?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE TABLE`/`CREATE INDEX` statement fails
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let started = Instant::now();

        self.migrate_ingredients().await?;
        self.migrate_recipes().await?;
        self.migrate_users().await?;

        AppLogger::log_database_operation(
            "migrate",
            "*",
            true,
            started.elapsed().as_millis() as u64,
        );
        Ok(())
    }

    /// Check the store is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Short description for startup logs
    #[must_use]
    pub fn backend_info(&self) -> String {
        format!(
            "SQLite (pool size {}, idle {})",
            self.pool.size(),
            self.pool.num_idle()
        )
    }
}
