// ABOUTME: Handlers for tokenAuth, verifyToken, and refreshToken
// ABOUTME: Credential checks run bcrypt off the async runtime; failures are reported as field errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::arguments::Arguments;
use super::failure::{FieldFailure, FieldResult};
use super::schema::MutationField;
use crate::auth::{AuthManager, IssuedToken};
use crate::database::Database;
use crate::errors::ErrorCode;
use crate::logging::AppLogger;
use recipe_core::constants::error_messages;
use serde_json::{json, Value};

fn invalid_credentials() -> FieldFailure {
    FieldFailure::reported(ErrorCode::InvalidCredentials, error_messages::INVALID_CREDENTIALS)
}

fn invalid_token(message: impl Into<String>) -> FieldFailure {
    FieldFailure::reported(ErrorCode::InvalidToken, message)
}

fn issued_json(issued: &IssuedToken) -> FieldResult<Value> {
    serde_json::to_value(issued)
        .map_err(|e| FieldFailure::internal(format!("Failed to serialize token: {e}")))
}

/// Resolve one of the open token fields
///
/// # Errors
///
/// Returns a reported failure for bad credentials or tokens and a fatal one
/// if the store or token signing fails
pub async fn resolve(
    field: MutationField,
    args: Arguments<'_>,
    db: &Database,
    auth_manager: &AuthManager,
) -> FieldResult<Value> {
    match field {
        MutationField::TokenAuth => {
            let username = args.required_str("username")?;
            let password = args.required_str("password")?;
            token_auth(username, password, db, auth_manager).await
        }
        MutationField::VerifyToken => {
            let token = args.required_str("token")?;
            match auth_manager.verify(token) {
                Ok(payload) => Ok(json!({ "payload": payload })),
                Err(e) => {
                    tracing::debug!(error = ?e, "verifyToken rejected");
                    Err(invalid_token(e.to_string()))
                }
            }
        }
        MutationField::RefreshToken => {
            let token = args.required_str("token")?;
            refresh_token(token, db, auth_manager).await
        }
        _ => Err(FieldFailure::internal(format!(
            "{} is not a token field",
            field.name()
        ))),
    }
}

async fn token_auth(
    username: &str,
    password: &str,
    db: &Database,
    auth_manager: &AuthManager,
) -> FieldResult<Value> {
    let Some(user) = db.get_user_by_username(username.trim()).await? else {
        AppLogger::log_auth_event(username, "token_auth", false, Some("unknown user"));
        return Err(invalid_credentials());
    };

    let password = password.to_owned();
    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| FieldFailure::internal(format!("Password check task failed: {e}")))?;

    match verified {
        Ok(true) => {}
        Ok(false) => {
            AppLogger::log_auth_event(&user.username, "token_auth", false, Some("bad password"));
            return Err(invalid_credentials());
        }
        Err(e) => {
            tracing::warn!(user = %user.username, error = %e, "Stored password hash is unusable");
            return Err(invalid_credentials());
        }
    }

    if !user.is_active {
        AppLogger::log_auth_event(&user.username, "token_auth", false, Some("inactive"));
        return Err(invalid_credentials());
    }

    db.update_last_login(user.id).await?;
    let issued = auth_manager
        .generate_token(&user)
        .map_err(|e| FieldFailure::internal(format!("Failed to issue token: {e}")))?;

    AppLogger::log_auth_event(&user.username, "token_auth", true, None);
    issued_json(&issued)
}

async fn refresh_token(token: &str, db: &Database, auth_manager: &AuthManager) -> FieldResult<Value> {
    let claims = auth_manager.validate_refresh(token).map_err(|e| {
        tracing::debug!(error = ?e, "refreshToken rejected");
        invalid_token(e.to_string())
    })?;

    let user = db.get_user_by_username(&claims.username).await?;
    match user {
        Some(user) if !user.is_active => return Err(invalid_token("User is disabled")),
        Some(user) if user.id.to_string() == claims.sub => {}
        _ => return Err(invalid_token("Invalid payload")),
    }

    let issued = auth_manager
        .reissue(&claims)
        .map_err(|e| FieldFailure::internal(format!("Failed to issue token: {e}")))?;

    AppLogger::log_auth_event(&claims.username, "refresh_token", true, None);
    issued_json(&issued)
}
