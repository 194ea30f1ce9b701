// ABOUTME: Handlers for the read fields: ingredient, allIngredients, recipe, allRecipes
// ABOUTME: No authentication; bad ids become INVALID_ID entries, unknown keys become null

use super::arguments::Arguments;
use super::failure::FieldResult;
use super::output;
use super::schema::QueryField;
use crate::database::Database;
use recipe_core::ids::{EntityKind, GlobalId};
use recipe_core::models::{Ingredient, NameFilter};
use serde_json::Value;

/// Resolve one read field
///
/// # Errors
///
/// Returns a reported failure for bad arguments or ids, and a fatal one if
/// the store fails
pub async fn resolve(field: QueryField, args: Arguments<'_>, db: &Database) -> FieldResult<Value> {
    match field {
        QueryField::Ingredient => {
            let key = GlobalId::decode_as(args.required_str("id")?, EntityKind::Ingredient)?;
            let found = db.get_ingredient(key).await?;
            let mut nodes = ingredient_nodes(db, found.as_slice()).await?;
            Ok(nodes.pop().unwrap_or(Value::Null))
        }
        QueryField::AllIngredients => {
            let filter = name_filter(args)?;
            let ingredients = db.list_ingredients(&filter).await?;
            Ok(Value::Array(ingredient_nodes(db, &ingredients).await?))
        }
        QueryField::Recipe => {
            let key = GlobalId::decode_as(args.required_str("id")?, EntityKind::Recipe)?;
            let found = db.get_recipe(key).await?;
            Ok(found.as_ref().map_or(Value::Null, output::recipe))
        }
        QueryField::AllRecipes => {
            let filter = name_filter(args)?;
            let recipes = db.list_recipes(&filter).await?;
            Ok(Value::Array(recipes.iter().map(output::recipe).collect()))
        }
    }
}

/// Render top-level ingredients together with the recipes using them
///
/// # Errors
///
/// Returns a fatal failure if the store fails
pub(super) async fn ingredient_nodes(
    db: &Database,
    ingredients: &[Ingredient],
) -> FieldResult<Vec<Value>> {
    let keys: Vec<i64> = ingredients.iter().map(|i| i.id).collect();
    let used_by = db.recipes_using_ingredients(&keys).await?;
    Ok(ingredients
        .iter()
        .map(|i| output::ingredient_node(i, used_by.get(&i.id).map_or(&[][..], Vec::as_slice)))
        .collect())
}

fn name_filter(args: Arguments<'_>) -> FieldResult<NameFilter> {
    Ok(args
        .optional_str("name")?
        .map_or_else(NameFilter::default, NameFilter::contains))
}
