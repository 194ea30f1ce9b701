// ABOUTME: Integration tests for building server resources from configuration
// ABOUTME: Uses a file-backed SQLite store to check directory creation and persistence across restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{init_test_logging, seed_ingredient};
use helpers::axum_test::AxumTestRequest;
use recipe_graph_server::config::{DatabaseUrl, ServerConfig};
use recipe_graph_server::server;
use serde_json::{json, Value};

fn file_config(dir: &tempfile::TempDir) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.database.url = DatabaseUrl::SQLite {
        path: dir.path().join("nested").join("recipes.db"),
    };
    config.auth.jwt_secret = Some("bootstrap-test-secret".into());
    config
}

#[tokio::test]
async fn test_build_resources_creates_database_directory() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();

    let resources = server::build_resources(file_config(&dir)).await.unwrap();

    assert!(dir.path().join("nested").join("recipes.db").exists());
    assert!(resources.database.ping().await.is_ok());
}

#[tokio::test]
async fn test_data_survives_reopen() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();

    {
        let resources = server::build_resources(file_config(&dir)).await.unwrap();
        let flour = seed_ingredient(&resources.database, "Flour", Some("1 kg")).await;
        resources
            .database
            .create_recipe("Bread", &[flour.id])
            .await
            .unwrap();
        resources.database.pool().close().await;
    }

    let reopened = server::build_resources(file_config(&dir)).await.unwrap();
    let response = AxumTestRequest::post("/graphql")
        .json(&json!({
            "fields": [{ "name": "allRecipes", "selection": ["name", "ingredientCount"] }]
        }))
        .send(server::build_router(reopened))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(
        body["data"]["allRecipes"],
        json!([{ "name": "Bread", "ingredientCount": 1 }])
    );
}

#[tokio::test]
async fn test_configured_secret_is_stable_across_restarts() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();

    let first = server::build_resources(file_config(&dir)).await.unwrap();
    let (_, token) = common::create_test_user_with_token(&first, "chef").await.unwrap();
    first.database.pool().close().await;

    let second = server::build_resources(file_config(&dir)).await.unwrap();
    let payload = second.auth_manager.verify(&token).unwrap();
    assert_eq!(payload.username, "chef");
}
