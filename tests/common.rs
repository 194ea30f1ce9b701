// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, token, user, and router helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `recipe_graph_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use recipe_graph_server::{
    api::{Document, DocumentResponse, Executor, FieldRequest},
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    middleware::AuthState,
    models::{Ingredient, User},
    resources::ServerResources,
    server,
};
use serde_json::{json, Value};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Signing secret shared by every test manager
pub const TEST_JWT_SECRET: &[u8] = b"recipe-graph-test-secret";

/// Password given to users created by [`create_test_user`]
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:", 1).await
}

/// Token manager with a five minute token and one hour refresh window
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET, 300, 3600)
}

/// Wire resources around an existing database
pub fn create_test_resources_with(database: Database, auth_manager: AuthManager) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(ServerConfig::default()),
    ))
}

/// Complete resource setup over a fresh in-memory store
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(create_test_resources_with(database, create_test_auth_manager()))
}

/// Full router with the production middleware stack
pub fn test_app(resources: &Arc<ServerResources>) -> axum::Router {
    server::build_router(Arc::clone(resources))
}

/// Create an active user with [`TEST_PASSWORD`], hashed at minimum cost
pub async fn create_test_user(database: &Database, username: &str) -> Result<User> {
    let hash = bcrypt::hash(TEST_PASSWORD, 4)?;
    Ok(database.create_user(username, &hash).await?)
}

/// Create a user and issue a token for them
pub async fn create_test_user_with_token(
    resources: &ServerResources,
    username: &str,
) -> Result<(User, String)> {
    let user = create_test_user(&resources.database, username).await?;
    let issued = resources.auth_manager.generate_token(&user)?;
    Ok((user, issued.token))
}

/// Resolve credentials the way the HTTP route does
pub async fn auth_state(resources: &ServerResources, token: Option<&str>) -> AuthState {
    let header = token.map(|t| format!("Bearer {t}"));
    resources
        .auth_middleware
        .resolve(header.as_deref())
        .await
        .expect("credential resolution should not hit a store failure")
}

/// Execute a document through the executor, bypassing HTTP
pub async fn execute(
    resources: &ServerResources,
    token: Option<&str>,
    document: &Document,
) -> DocumentResponse {
    let auth = auth_state(resources, token).await;
    Executor::new(resources, &auth)
        .execute(document)
        .await
        .expect("document should execute")
}

/// Run a single query field and return its value
pub async fn query_one(resources: &ServerResources, field: FieldRequest) -> Value {
    let key = field.response_key().to_owned();
    let response = execute(resources, None, &Document::query(vec![field])).await;
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.field(&key).cloned().unwrap_or(Value::Null)
}

/// Run a single mutation field with `token` and return the whole response
pub async fn mutate(
    resources: &ServerResources,
    token: Option<&str>,
    field: FieldRequest,
) -> DocumentResponse {
    execute(resources, token, &Document::mutation(vec![field])).await
}

/// Create an ingredient directly in the store
pub async fn seed_ingredient(database: &Database, name: &str, quantity: Option<&str>) -> Ingredient {
    let input = recipe_graph_server::validation::new_ingredient(name, quantity)
        .expect("seed ingredient should validate");
    database
        .create_ingredient(&input)
        .await
        .expect("seed ingredient should be created")
}

/// Encoded global id of an ingredient
pub fn ingredient_gid(ingredient: &Ingredient) -> String {
    ingredient.global_id().encode()
}

/// Argument helper for `ingredientIds`
pub fn id_list<S: AsRef<str>>(ids: &[S]) -> Value {
    json!(ids.iter().map(AsRef::as_ref).collect::<Vec<&str>>())
}
