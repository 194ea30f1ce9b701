// ABOUTME: Output formatting helpers for recipe-admin
// ABOUTME: Consistent console rendering of users, ingredients, and recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_graph_server::models::{Ingredient, Recipe};

/// Report a created or reset user
pub fn display_user_created(username: &str, reset: bool) {
    let action = if reset { "updated" } else { "created" };
    println!("\nUser {action}: {username}");
    println!("{}", "=".repeat(50));
    println!("Obtain a token with:");
    println!(
        "  {{\"operation\":\"mutation\",\"fields\":[{{\"name\":\"tokenAuth\",\"arguments\":{{\"username\":\"{username}\",\"password\":\"...\"}}}}]}}"
    );
    println!("Send it as: Authorization: Bearer <token>");
}

/// Report an activation change
pub fn display_user_status(username: &str, active: bool) {
    let state = if active { "active" } else { "inactive" };
    println!("User {username} is now {state}");
}

/// Print an ingredient table
pub fn display_ingredients(ingredients: &[Ingredient]) {
    if ingredients.is_empty() {
        println!("No ingredients found");
        return;
    }
    println!("{:<24} {:<40} QUANTITY", "ID", "NAME");
    for ingredient in ingredients {
        println!(
            "{:<24} {:<40} {}",
            ingredient.global_id().to_string(),
            ingredient.name,
            ingredient.quantity.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} ingredient(s)", ingredients.len());
}

/// Print a recipe table
pub fn display_recipes(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found");
        return;
    }
    println!("{:<24} {:<40} INGREDIENTS", "ID", "NAME");
    for recipe in recipes {
        println!(
            "{:<24} {:<40} {}",
            recipe.global_id().to_string(),
            recipe.name,
            recipe.ingredient_count()
        );
    }
    println!("\n{} recipe(s)", recipes.len());
}
