// ABOUTME: Read-only catalog listings for recipe-admin
// ABOUTME: Prints stored ingredients and recipes with their opaque ids

use anyhow::Result;
use recipe_graph_server::database::Database;
use recipe_graph_server::models::NameFilter;

use crate::helpers::display::{display_ingredients, display_recipes};

fn filter(name: Option<String>) -> NameFilter {
    name.map_or_else(NameFilter::default, NameFilter::contains)
}

/// Print ingredients matching `name`
pub async fn list_ingredients(database: &Database, name: Option<String>) -> Result<()> {
    let ingredients = database.list_ingredients(&filter(name)).await?;
    display_ingredients(&ingredients);
    Ok(())
}

/// Print recipes matching `name`
pub async fn list_recipes(database: &Database, name: Option<String>) -> Result<()> {
    let recipes = database.list_recipes(&filter(name)).await?;
    display_recipes(&recipes);
    Ok(())
}
