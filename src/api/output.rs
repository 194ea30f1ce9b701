// ABOUTME: JSON rendering of entities and mutation payloads, and selection projection
// ABOUTME: Entity ids are rendered as opaque global ids; ingredientCount is derived at render time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_core::models::{Ingredient, Recipe, RecipeSummary};
use serde_json::{json, Map, Value};

const INGREDIENT_KEYS: &[&str] = &["id", "name", "quantity", "recipes"];
const RECIPE_KEYS: &[&str] = &["id", "name", "ingredientCount", "ingredients"];

/// What a field returns, for selection checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// An ingredient or list of ingredients
    Ingredient,
    /// A recipe or list of recipes
    Recipe,
    /// `{ ingredient, ok }`; the selection applies to `ingredient`
    IngredientPayload,
    /// `{ recipe, ok }`; the selection applies to `recipe`
    RecipePayload,
    /// A plain object with these keys
    Object(&'static [&'static str]),
}

impl Shape {
    /// Keys a selection may name
    #[must_use]
    pub const fn selectable(self) -> &'static [&'static str] {
        match self {
            Self::Ingredient | Self::IngredientPayload => INGREDIENT_KEYS,
            Self::Recipe | Self::RecipePayload => RECIPE_KEYS,
            Self::Object(keys) => keys,
        }
    }

    /// First selected key this shape does not have
    #[must_use]
    pub fn unknown_key<'a>(self, selection: &'a [String]) -> Option<&'a str> {
        let allowed = self.selectable();
        selection
            .iter()
            .map(String::as_str)
            .find(|key| !allowed.contains(key))
    }

    /// Apply a checked selection to a rendered value
    #[must_use]
    pub fn project(self, value: Value, selection: &[String]) -> Value {
        match self {
            Self::IngredientPayload => project_member(value, "ingredient", selection),
            Self::RecipePayload => project_member(value, "recipe", selection),
            Self::Ingredient | Self::Recipe | Self::Object(_) => project(value, selection),
        }
    }
}

fn project_member(mut value: Value, member: &str, selection: &[String]) -> Value {
    if let Some(inner) = value.get_mut(member) {
        *inner = project(inner.take(), selection);
    }
    value
}

/// Keep only the selected keys, in selection order; lists are projected element-wise
fn project(value: Value, selection: &[String]) -> Value {
    match value {
        Value::Object(mut object) => {
            let mut projected = Map::with_capacity(selection.len());
            for key in selection {
                if let Some(v) = object.remove(key) {
                    projected.insert(key.clone(), v);
                }
            }
            Value::Object(projected)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| project(item, selection))
                .collect(),
        ),
        other => other,
    }
}

/// Render an ingredient as it appears inside a recipe
#[must_use]
pub fn ingredient(ingredient: &Ingredient) -> Value {
    json!({
        "id": ingredient.global_id().encode(),
        "name": ingredient.name,
        "quantity": ingredient.quantity,
    })
}

/// Render a top-level ingredient with the recipes that use it
#[must_use]
pub fn ingredient_node(entity: &Ingredient, used_by: &[RecipeSummary]) -> Value {
    let mut value = ingredient(entity);
    value["recipes"] = used_by
        .iter()
        .map(|r| json!({ "id": r.global_id().encode(), "name": r.name }))
        .collect();
    value
}

/// Render a recipe with its ingredient set and derived count
#[must_use]
pub fn recipe(recipe: &Recipe) -> Value {
    json!({
        "id": recipe.global_id().encode(),
        "name": recipe.name,
        "ingredientCount": recipe.ingredient_count(),
        "ingredients": recipe.ingredients.iter().map(ingredient).collect::<Vec<_>>(),
    })
}

/// `{ ingredient, ok }` around an already rendered ingredient node
#[must_use]
pub fn ingredient_payload(node: Option<Value>) -> Value {
    let ok = node.is_some();
    json!({
        "ingredient": node.unwrap_or(Value::Null),
        "ok": ok,
    })
}

/// `{ recipe, ok }` with `ok` tracking whether a recipe is present
#[must_use]
pub fn recipe_payload(entity: Option<&Recipe>) -> Value {
    json!({
        "recipe": entity.map_or(Value::Null, recipe),
        "ok": entity.is_some(),
    })
}

/// `{ ok }`
#[must_use]
pub fn ok_payload(ok: bool) -> Value {
    json!({ "ok": ok })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            id: 3,
            name: "Omelette".into(),
            ingredients: vec![
                Ingredient {
                    id: 1,
                    name: "Egg".into(),
                    quantity: Some("3".into()),
                },
                Ingredient {
                    id: 2,
                    name: "Salt".into(),
                    quantity: None,
                },
            ],
        }
    }

    #[test]
    fn test_recipe_rendering_derives_count() {
        let rendered = recipe(&sample_recipe());
        assert_eq!(rendered["ingredientCount"], 2);
        assert_eq!(rendered["ingredients"][1]["quantity"], Value::Null);
        assert_eq!(rendered["id"], "UmVjaXBlOjM=");
    }

    #[test]
    fn test_selection_checks() {
        let selection = vec!["name".to_owned(), "calories".to_owned()];
        assert_eq!(Shape::Ingredient.unknown_key(&selection), Some("calories"));
        assert_eq!(Shape::RecipePayload.unknown_key(&["ingredientCount".into()]), None);
        assert_eq!(Shape::Object(&["ok"]).unknown_key(&["recipe".into()]), Some("recipe"));
    }

    #[test]
    fn test_projection_of_payload_targets_entity() {
        let payload = recipe_payload(Some(&sample_recipe()));
        let projected = Shape::RecipePayload.project(payload, &["ingredientCount".into()]);
        assert_eq!(projected, json!({ "recipe": { "ingredientCount": 2 }, "ok": true }));

        let failed = Shape::RecipePayload.project(recipe_payload(None), &["name".into()]);
        assert_eq!(failed, json!({ "recipe": null, "ok": false }));
    }

    #[test]
    fn test_ingredient_node_lists_recipes() {
        let salt = Ingredient {
            id: 2,
            name: "Salt".into(),
            quantity: None,
        };
        let used_by = [RecipeSummary {
            id: 3,
            name: "Omelette".into(),
        }];
        let node = ingredient_node(&salt, &used_by);
        assert_eq!(node["recipes"], json!([{ "id": "UmVjaXBlOjM=", "name": "Omelette" }]));
        assert_eq!(ingredient_node(&salt, &[])["recipes"], json!([]));
        assert!(recipe(&sample_recipe())["ingredients"][0].get("recipes").is_none());

        let payload = Shape::IngredientPayload.project(
            ingredient_payload(Some(node)),
            &["name".into(), "recipes".into()],
        );
        assert_eq!(payload["ingredient"]["name"], "Salt");
        assert_eq!(payload["ok"], true);
    }

    #[test]
    fn test_projection_of_lists() {
        let list = Value::Array(vec![recipe(&sample_recipe())]);
        let projected = Shape::Recipe.project(list, &["name".into()]);
        assert_eq!(projected, json!([{ "name": "Omelette" }]));
    }
}
