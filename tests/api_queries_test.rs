// ABOUTME: Integration tests for the read fields of the document API
// ABOUTME: Covers lookups by global id, name filtering, selections, aliases, and field errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{create_test_resources, execute, ingredient_gid, query_one, seed_ingredient};
use recipe_graph_server::api::{Document, FieldRequest};
use recipe_graph_server::errors::ErrorCode;
use recipe_graph_server::ids::GlobalId;
use serde_json::{json, Value};

#[tokio::test]
async fn test_ingredient_by_id() {
    let resources = create_test_resources().await.unwrap();
    let flour = seed_ingredient(&resources.database, "Flour", Some("500 g")).await;

    let value = query_one(
        &resources,
        FieldRequest::new("ingredient").arg("id", ingredient_gid(&flour)),
    )
    .await;

    assert_eq!(
        value,
        json!({
            "id": ingredient_gid(&flour),
            "name": "Flour",
            "quantity": "500 g",
            "recipes": []
        })
    );
}

#[tokio::test]
async fn test_ingredient_lists_recipes_using_it() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let butter = seed_ingredient(db, "Butter", None).await;
    let flour = seed_ingredient(db, "Flour", None).await;
    let shortbread = db.create_recipe("Shortbread", &[butter.id, flour.id]).await.unwrap();
    let roux = db.create_recipe("Roux", &[butter.id, flour.id]).await.unwrap();

    let value = query_one(
        &resources,
        FieldRequest::new("ingredient")
            .arg("id", ingredient_gid(&butter))
            .select(&["name", "recipes"]),
    )
    .await;
    assert_eq!(
        value,
        json!({
            "name": "Butter",
            "recipes": [
                { "id": shortbread.global_id().encode(), "name": "Shortbread" },
                { "id": roux.global_id().encode(), "name": "Roux" }
            ]
        })
    );

    db.remove_recipe_ingredient(shortbread.id, butter.id).await.unwrap();
    db.remove_recipe_ingredient(roux.id, butter.id).await.unwrap();

    let all = query_one(
        &resources,
        FieldRequest::new("allIngredients").select(&["name", "recipes"]),
    )
    .await;
    assert_eq!(all[0], json!({ "name": "Butter", "recipes": [] }));
    assert_eq!(all[1]["recipes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_ids_are_opaque_kind_and_key() {
    let resources = create_test_resources().await.unwrap();
    let flour = seed_ingredient(&resources.database, "Flour", None).await;
    let recipe = resources
        .database
        .create_recipe("Bread", &[flour.id])
        .await
        .unwrap();

    let value = query_one(
        &resources,
        FieldRequest::new("allRecipes").select(&["id", "ingredients"]),
    )
    .await;

    let recipe_id = value[0]["id"].as_str().unwrap();
    let ingredient_id = value[0]["ingredients"][0]["id"].as_str().unwrap();
    assert_eq!(
        STANDARD.decode(recipe_id).unwrap(),
        format!("Recipe:{}", recipe.id).into_bytes()
    );
    assert_eq!(
        STANDARD.decode(ingredient_id).unwrap(),
        format!("Ingredient:{}", flour.id).into_bytes()
    );
}

#[tokio::test]
async fn test_unknown_ingredient_is_null() {
    let resources = create_test_resources().await.unwrap();
    let value = query_one(
        &resources,
        FieldRequest::new("ingredient").arg("id", GlobalId::ingredient(12).encode()),
    )
    .await;
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_wrong_kind_id_is_reported() {
    let resources = create_test_resources().await.unwrap();
    let flour = seed_ingredient(&resources.database, "Flour", None).await;

    let response = execute(
        &resources,
        None,
        &Document::query(vec![
            FieldRequest::new("recipe").arg("id", ingredient_gid(&flour))
        ]),
    )
    .await;

    assert_eq!(response.field("recipe"), Some(&Value::Null));
    let error = response.errors_for("recipe").next().unwrap();
    assert_eq!(error.code, ErrorCode::InvalidId);
    assert_eq!(error.path, vec!["recipe".to_owned()]);
}

#[tokio::test]
async fn test_malformed_id_is_reported() {
    let resources = create_test_resources().await.unwrap();
    let response = execute(
        &resources,
        None,
        &Document::query(vec![FieldRequest::new("ingredient").arg("id", "%%%")]),
    )
    .await;
    let error = response.errors_for("ingredient").next().unwrap();
    assert_eq!(error.code, ErrorCode::InvalidId);
}

#[tokio::test]
async fn test_all_ingredients_filter_ignores_case() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    seed_ingredient(db, "Egg", None).await;
    seed_ingredient(db, "Eggplant", None).await;
    seed_ingredient(db, "Quail EGGS", None).await;
    seed_ingredient(db, "Flour", None).await;

    for needle in ["egg", "EGG", "eGg"] {
        let value = query_one(
            &resources,
            FieldRequest::new("allIngredients")
                .arg("name", needle)
                .select(&["name"]),
        )
        .await;
        assert_eq!(
            value,
            json!([{ "name": "Egg" }, { "name": "Eggplant" }, { "name": "Quail EGGS" }])
        );
    }
}

#[tokio::test]
async fn test_all_ingredients_without_filter() {
    let resources = create_test_resources().await.unwrap();
    seed_ingredient(&resources.database, "Salt", None).await;
    seed_ingredient(&resources.database, "Pepper", None).await;

    let unfiltered = query_one(&resources, FieldRequest::new("allIngredients")).await;
    assert_eq!(unfiltered.as_array().unwrap().len(), 2);

    let null_filter = query_one(
        &resources,
        FieldRequest::new("allIngredients").arg("name", Value::Null),
    )
    .await;
    assert_eq!(null_filter.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_recipe_with_ingredient_count() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let eggs = seed_ingredient(db, "Eggs", Some("2")).await;
    let milk = seed_ingredient(db, "Milk", None).await;
    let recipe = db.create_recipe("Custard", &[eggs.id, milk.id]).await.unwrap();

    let value = query_one(
        &resources,
        FieldRequest::new("recipe")
            .arg("id", recipe.global_id().encode())
            .select(&["name", "ingredientCount", "ingredients"]),
    )
    .await;

    assert_eq!(value["name"], "Custard");
    assert_eq!(value["ingredientCount"], 2);
    assert_eq!(value["ingredients"][0]["name"], "Eggs");
    assert_eq!(value["ingredients"][1]["name"], "Milk");
    assert!(value.get("id").is_none());
}

#[tokio::test]
async fn test_all_recipes_filter() {
    let resources = create_test_resources().await.unwrap();
    resources.database.create_recipe("Lemon Tart", &[]).await.unwrap();
    resources.database.create_recipe("Treacle TART", &[]).await.unwrap();
    resources.database.create_recipe("Scones", &[]).await.unwrap();

    let value = query_one(
        &resources,
        FieldRequest::new("allRecipes")
            .arg("name", "tart")
            .select(&["name", "ingredientCount"]),
    )
    .await;

    assert_eq!(
        value,
        json!([
            { "name": "Lemon Tart", "ingredientCount": 0 },
            { "name": "Treacle TART", "ingredientCount": 0 }
        ])
    );
}

#[tokio::test]
async fn test_aliases_key_the_response() {
    let resources = create_test_resources().await.unwrap();
    let salt = seed_ingredient(&resources.database, "Salt", None).await;
    let sugar = seed_ingredient(&resources.database, "Sugar", None).await;

    let response = execute(
        &resources,
        None,
        &Document::query(vec![
            FieldRequest::new("ingredient")
                .alias("first")
                .arg("id", ingredient_gid(&salt))
                .select(&["name"]),
            FieldRequest::new("ingredient")
                .alias("second")
                .arg("id", ingredient_gid(&sugar))
                .select(&["name"]),
        ]),
    )
    .await;

    assert!(response.errors.is_empty());
    assert_eq!(response.field("first"), Some(&json!({ "name": "Salt" })));
    assert_eq!(response.field("second"), Some(&json!({ "name": "Sugar" })));
}

#[tokio::test]
async fn test_unknown_field_does_not_stop_other_fields() {
    let resources = create_test_resources().await.unwrap();
    seed_ingredient(&resources.database, "Salt", None).await;

    let response = execute(
        &resources,
        None,
        &Document::query(vec![
            FieldRequest::new("allWidgets"),
            FieldRequest::new("allIngredients").select(&["name"]),
        ]),
    )
    .await;

    let error = response.errors_for("allWidgets").next().unwrap();
    assert_eq!(error.code, ErrorCode::UnknownField);
    assert_eq!(error.message, "Cannot query field 'allWidgets' on type 'Query'");
    assert_eq!(
        response.field("allIngredients"),
        Some(&json!([{ "name": "Salt" }]))
    );
}

#[tokio::test]
async fn test_mutation_field_is_unknown_on_query() {
    let resources = create_test_resources().await.unwrap();
    let response = execute(
        &resources,
        None,
        &Document::query(vec![FieldRequest::new("createIngredient").arg("name", "Salt")]),
    )
    .await;

    let error = response.errors_for("createIngredient").next().unwrap();
    assert_eq!(error.code, ErrorCode::UnknownField);
    assert_eq!(resources.database.count_ingredients().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_selection_is_reported() {
    let resources = create_test_resources().await.unwrap();
    let response = execute(
        &resources,
        None,
        &Document::query(vec![FieldRequest::new("allRecipes").select(&["name", "calories"])]),
    )
    .await;

    let error = response.errors_for("allRecipes").next().unwrap();
    assert_eq!(error.code, ErrorCode::InvalidSelection);
    assert!(error.message.contains("calories"));
}

#[tokio::test]
async fn test_argument_errors() {
    let resources = create_test_resources().await.unwrap();
    let response = execute(
        &resources,
        None,
        &Document::query(vec![
            FieldRequest::new("ingredient").alias("missing"),
            FieldRequest::new("ingredient").alias("wrongType").arg("id", 5),
            FieldRequest::new("allRecipes").alias("unknown").arg("limit", 3),
        ]),
    )
    .await;

    for key in ["missing", "wrongType", "unknown"] {
        let error = response.errors_for(key).next().unwrap();
        assert_eq!(error.code, ErrorCode::InvalidArgument, "for {key}");
        assert_eq!(response.field(key), Some(&Value::Null));
    }
}
