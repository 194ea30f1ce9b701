// ABOUTME: Request authentication that turns the Authorization header into an AuthState
// ABOUTME: Accepts Bearer and JWT schemes, validates the token, and checks the account is active
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthManager;
use crate::database::{Database, StoreError};
use recipe_core::constants::{auth_schemes, error_messages};
use std::sync::Arc;

/// An account whose token checked out
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User key
    pub user_id: i64,
    /// Login name
    pub username: String,
}

/// Outcome of authenticating one request
#[derive(Debug, Clone)]
pub enum AuthState {
    /// No credentials were presented
    Anonymous,
    /// A valid token for an active user
    Authenticated(AuthenticatedUser),
    /// Credentials were presented and refused
    Rejected(String),
}

impl AuthState {
    /// The authenticated user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous | Self::Rejected(_) => None,
        }
    }

    /// Message reported when a gated field is refused
    #[must_use]
    pub fn denial_message(&self) -> &str {
        match self {
            Self::Rejected(reason) => reason,
            Self::Anonymous | Self::Authenticated(_) => error_messages::PERMISSION_DENIED,
        }
    }

    /// Label for logs
    #[must_use]
    pub fn username(&self) -> &str {
        self.user().map_or("anonymous", |u| u.username.as_str())
    }
}

/// Extract the token from an `Authorization` header value
///
/// Returns `None` for schemes this server does not handle.
fn parse_authorization(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ').unwrap_or((header.trim(), ""));
    let known = scheme.eq_ignore_ascii_case(auth_schemes::BEARER)
        || scheme.eq_ignore_ascii_case(auth_schemes::JWT);
    known.then(|| token.trim())
}

/// Middleware resolving request credentials against issued tokens and stored users
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Database,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Database) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Resolve the request's `Authorization` header into an [`AuthState`]
    ///
    /// Token problems are not errors here; they become [`AuthState::Rejected`]
    /// so read fields in the same document still run.
    ///
    /// # Errors
    ///
    /// Returns an error only if the user lookup fails
    #[tracing::instrument(
        skip(self, auth_header),
        fields(user = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub async fn resolve(&self, auth_header: Option<&str>) -> Result<AuthState, StoreError> {
        let Some(header) = auth_header else {
            return Ok(AuthState::Anonymous);
        };

        let Some(token) = parse_authorization(header) else {
            tracing::debug!("Ignoring Authorization header with unsupported scheme");
            return Ok(AuthState::Anonymous);
        };

        if token.is_empty() {
            tracing::Span::current().record("success", false);
            return Ok(AuthState::Rejected(
                error_messages::INVALID_SIGNATURE.to_owned(),
            ));
        }

        let claims = match self.auth_manager.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::Span::current().record("success", false);
                tracing::debug!(error = ?e, "Token rejected");
                return Ok(AuthState::Rejected(e.to_string()));
            }
        };
        tracing::Span::current().record("user", claims.username.as_str());

        let user = self.database.get_user_by_username(&claims.username).await?;
        let state = match user {
            Some(user) if !user.is_active => AuthState::Rejected("User is disabled".to_owned()),
            Some(user) if user.id.to_string() == claims.sub => {
                AuthState::Authenticated(AuthenticatedUser {
                    user_id: user.id,
                    username: user.username,
                })
            }
            _ => AuthState::Rejected("Invalid payload".to_owned()),
        };

        tracing::Span::current().record("success", state.user().is_some());
        Ok(state)
    }
}
