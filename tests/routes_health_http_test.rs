// ABOUTME: HTTP integration tests for health check routes
// ABOUTME: Tests liveness and readiness endpoints without authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::create_test_resources;
use helpers::axum_test::AxumTestRequest;
use recipe_graph_server::routes::HealthRoutes;

// ============================================================================
// GET /health
// ============================================================================

#[tokio::test]
async fn test_health_endpoint_success() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/health")
        .send(HealthRoutes::routes(resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "recipe-graph-server");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_endpoint_ignores_credentials() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/health")
        .bearer("definitely-not-a-token")
        .send(HealthRoutes::routes(resources))
        .await;

    assert_eq!(response.status(), 200);
}

// ============================================================================
// GET /ready
// ============================================================================

#[tokio::test]
async fn test_ready_endpoint_with_database() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/ready")
        .send(HealthRoutes::routes(resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_ready_endpoint_after_pool_closed() {
    let resources = create_test_resources().await.unwrap();
    resources.database.pool().close().await;

    let response = AxumTestRequest::get("/ready")
        .send(HealthRoutes::routes(resources))
        .await;

    assert_eq!(response.status(), 503);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_health_routes_mounted_in_full_router() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/health")
        .send(common::test_app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    assert!(response.header("x-request-id").is_some());
}
