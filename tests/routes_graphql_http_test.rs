// ABOUTME: HTTP integration tests for the document endpoint
// ABOUTME: Tests body parsing, status codes, request ids, and authorization headers through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! HTTP integration tests for `POST /graphql`
//!
//! These drive the router built by `server::build_router`, so the request id,
//! CORS, and body limit layers are all in play.

mod common;
mod helpers;

use common::{create_test_resources, create_test_user_with_token, seed_ingredient, test_app};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

// ============================================================================
// Well-formed documents
// ============================================================================

#[tokio::test]
async fn test_query_document_returns_data() {
    let resources = create_test_resources().await.unwrap();
    seed_ingredient(&resources.database, "Flour", Some("1 kg")).await;

    let response = AxumTestRequest::post("/graphql")
        .json(&json!({
            "operation": "query",
            "fields": [{ "name": "allIngredients", "selection": ["name", "quantity"] }]
        }))
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "data": { "allIngredients": [{ "name": "Flour", "quantity": "1 kg" }] } })
    );
}

#[tokio::test]
async fn test_operation_defaults_to_query() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/graphql")
        .json(&json!({ "fields": [{ "name": "allRecipes" }] }))
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"]["allRecipes"], json!([]));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_field_errors_still_return_200() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/graphql")
        .json(&json!({
            "operation": "mutation",
            "fields": [{ "name": "createIngredient", "arguments": { "name": "Salt" } }]
        }))
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"]["createIngredient"], Value::Null);
    assert_eq!(body["errors"][0]["code"], "UNAUTHENTICATED");
    assert_eq!(body["errors"][0]["path"], json!(["createIngredient"]));
    assert_eq!(resources.database.count_ingredients().await.unwrap(), 0);
}

#[tokio::test]
async fn test_bearer_and_jwt_schemes_authenticate() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user_with_token(&resources, "chef").await.unwrap();

    for (scheme, name) in [("Bearer", "Salt"), ("JWT", "Pepper")] {
        let response = AxumTestRequest::post("/graphql")
            .header("authorization", &format!("{scheme} {token}"))
            .json(&json!({
                "operation": "mutation",
                "fields": [{
                    "name": "createIngredient",
                    "arguments": { "name": name },
                    "selection": ["name"]
                }]
            }))
            .send(test_app(&resources))
            .await;

        assert_eq!(response.status(), 200);
        let body: Value = response.json();
        assert_eq!(
            body["data"]["createIngredient"],
            json!({ "ingredient": { "name": name }, "ok": true })
        );
    }
    assert_eq!(resources.database.count_ingredients().await.unwrap(), 2);
}

#[tokio::test]
async fn test_expired_token_reports_reason() {
    let resources = create_test_resources().await.unwrap();
    let (user, _) = create_test_user_with_token(&resources, "chef").await.unwrap();
    let expired = recipe_graph_server::auth::AuthManager::new(common::TEST_JWT_SECRET, -10, 3600)
        .generate_token(&user)
        .unwrap()
        .token;

    let response = AxumTestRequest::post("/graphql")
        .bearer(&expired)
        .json(&json!({
            "operation": "mutation",
            "fields": [{ "name": "createIngredient", "arguments": { "name": "Salt" } }]
        }))
        .send(test_app(&resources))
        .await;

    let body: Value = response.json();
    assert_eq!(body["errors"][0]["code"], "UNAUTHENTICATED");
    assert_eq!(body["errors"][0]["message"], "Signature has expired");
}

#[tokio::test]
async fn test_login_flow_over_http() {
    let resources = create_test_resources().await.unwrap();
    common::create_test_user(&resources.database, "chef").await.unwrap();

    let login = AxumTestRequest::post("/graphql")
        .json(&json!({
            "operation": "mutation",
            "fields": [{
                "name": "tokenAuth",
                "arguments": { "username": "chef", "password": common::TEST_PASSWORD },
                "selection": ["token"]
            }]
        }))
        .send(test_app(&resources))
        .await;
    let body: Value = login.json();
    let token = body["data"]["tokenAuth"]["token"].as_str().unwrap().to_owned();

    let create = AxumTestRequest::post("/graphql")
        .bearer(&token)
        .json(&json!({
            "operation": "mutation",
            "fields": [{ "name": "createRecipe", "arguments": { "name": "Toast", "ingredientIds": [] } }]
        }))
        .send(test_app(&resources))
        .await;
    let body: Value = create.json();
    assert_eq!(body["data"]["createRecipe"]["ok"], true);
    assert_eq!(body["data"]["createRecipe"]["recipe"]["ingredientCount"], 0);
}

// ============================================================================
// Rejected documents
// ============================================================================

#[tokio::test]
async fn test_malformed_json_is_400() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/graphql")
        .raw_json("{ not json")
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_unknown_document_key_is_400() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/graphql")
        .json(&json!({ "fields": [{ "name": "allRecipes" }], "variables": {} }))
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_empty_document_is_400() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/graphql")
        .json(&json!({ "operation": "query", "fields": [] }))
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_duplicate_response_keys_are_400() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/graphql")
        .json(&json!({
            "fields": [{ "name": "allRecipes" }, { "name": "allRecipes" }]
        }))
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_get_is_not_allowed() {
    let resources = create_test_resources().await.unwrap();
    let response = AxumTestRequest::get("/graphql").send(test_app(&resources)).await;
    assert_eq!(response.status(), 405);
}

// ============================================================================
// Request ids
// ============================================================================

#[tokio::test]
async fn test_request_id_is_assigned() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/graphql")
        .json(&json!({ "fields": [{ "name": "allRecipes" }] }))
        .send(test_app(&resources))
        .await;

    let request_id = response.header("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_request_id_is_propagated_into_errors() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/graphql")
        .header("x-request-id", "req-abc-123")
        .raw_json("[]")
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.header("x-request-id"), Some("req-abc-123"));
    let body: Value = response.json();
    assert_eq!(body["error"]["request_id"], "req-abc-123");
}
