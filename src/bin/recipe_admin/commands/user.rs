// ABOUTME: User management commands for recipe-admin
// ABOUTME: Creates users with bcrypt-hashed passwords and toggles account activity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, Context, Result};
use recipe_graph_server::database::{Database, StoreError};
use recipe_graph_server::validation;
use tracing::info;

use crate::helpers::display::{display_user_created, display_user_status};

async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .context("Password hashing task failed")?
        .context("Failed to hash password")
}

/// Create a user, or with `force` reset an existing user's password
pub async fn create(database: &Database, username: &str, password: String, force: bool) -> Result<()> {
    let username = validation::username(username).map_err(|e| anyhow!("{e}"))?;
    if password.is_empty() {
        return Err(anyhow!("Password must not be empty"));
    }

    let password_hash = hash_password(password).await?;

    match database.create_user(&username, &password_hash).await {
        Ok(user) => {
            info!(user_id = user.id, "User created");
            display_user_created(&user.username, false);
            Ok(())
        }
        Err(StoreError::UniqueViolation { .. }) if force => {
            database
                .reset_user_password(&username, &password_hash)
                .await?;
            info!(username = %username, "User password reset");
            display_user_created(&username, true);
            Ok(())
        }
        Err(StoreError::UniqueViolation { .. }) => Err(anyhow!(
            "User '{username}' already exists; use --force to reset the password"
        )),
        Err(e) => Err(e.into()),
    }
}

/// Enable or disable token issue for a user
pub async fn set_active(database: &Database, username: &str, active: bool) -> Result<()> {
    if database.set_user_active(username, active).await? {
        display_user_status(username, active);
        Ok(())
    } else {
        Err(anyhow!("User '{username}' does not exist"))
    }
}
