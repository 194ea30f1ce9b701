// ABOUTME: Centralized resource container shared by every request handler
// ABOUTME: Holds the database handle, token manager, auth middleware, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared through an `Arc`. Nothing in here is
//! mutated after construction; isolation between requests comes from the
//! store's transactions.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::AuthMiddleware;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Store handle
    pub database: Database,
    /// Token issuer and verifier
    pub auth_manager: Arc<AuthManager>,
    /// Per-request credential resolution
    pub auth_middleware: Arc<AuthMiddleware>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire the shared resources together
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let auth_manager = Arc::new(auth_manager);
        let auth_middleware = Arc::new(AuthMiddleware::new(
            Arc::clone(&auth_manager),
            database.clone(),
        ));

        Self {
            database,
            auth_manager,
            auth_middleware,
            config,
        }
    }
}
