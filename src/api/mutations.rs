// ABOUTME: Handlers for the gated write fields on ingredients and recipes
// ABOUTME: Expected failures yield ok=false with a null entity; only store failures abort the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Write fields
//!
//! Every handler here runs only after the executor has confirmed the caller
//! is authenticated. Malformed or wrong-kind ids, validation failures, and
//! unknown records are not errors from the caller's point of view: they
//! produce `ok: false`.

use super::arguments::Arguments;
use super::failure::{FieldFailure, FieldResult};
use super::output;
use super::queries;
use super::schema::MutationField;
use crate::database::{Database, StoreError};
use crate::logging::AppLogger;
use crate::middleware::AuthenticatedUser;
use crate::validation;
use recipe_core::ids::{EntityKind, GlobalId};
use recipe_core::models::Ingredient;
use serde_json::Value;
use std::time::Instant;

/// Decode an id, treating any decode failure as "does not resolve"
fn resolve_key(value: &str, kind: EntityKind) -> Option<i64> {
    GlobalId::decode_as(value, kind)
        .inspect_err(|e| tracing::debug!(error = %e, "Id did not resolve"))
        .ok()
}

/// Turn expected store outcomes into `None` and keep real failures as errors
fn settle<T>(result: Result<T, StoreError>) -> FieldResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_expected() => {
            tracing::debug!(error = %e, "Mutation reported ok=false");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve one gated write field for `user`
///
/// # Errors
///
/// Returns a reported failure for malformed arguments and a fatal one if the
/// store fails
pub async fn resolve(
    field: MutationField,
    args: Arguments<'_>,
    db: &Database,
    user: &AuthenticatedUser,
) -> FieldResult<Value> {
    let started = Instant::now();
    let payload = match field {
        MutationField::CreateIngredient => create_ingredient(args, db).await?,
        MutationField::UpdateIngredient => update_ingredient(args, db).await?,
        MutationField::DeleteIngredient => delete_ingredient(args, db).await?,
        MutationField::CreateRecipe => create_recipe(args, db).await?,
        MutationField::AddIngredientToRecipe => change_association(args, db, true).await?,
        MutationField::RemoveIngredientFromRecipe => change_association(args, db, false).await?,
        MutationField::TokenAuth | MutationField::VerifyToken | MutationField::RefreshToken => {
            return Err(FieldFailure::internal(format!(
                "{} is not a gated write field",
                field.name()
            )));
        }
    };

    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let ok = payload.get("ok").and_then(Value::as_bool).unwrap_or(false);
    AppLogger::log_mutation(field.name(), &user.username, ok, elapsed);
    Ok(payload)
}

async fn ingredient_payload(db: &Database, entity: Option<Ingredient>) -> FieldResult<Value> {
    let node = match entity {
        Some(ingredient) => queries::ingredient_nodes(db, &[ingredient]).await?.pop(),
        None => None,
    };
    Ok(output::ingredient_payload(node))
}

async fn create_ingredient(args: Arguments<'_>, db: &Database) -> FieldResult<Value> {
    let name = args.required_str("name")?;
    let quantity = args.optional_str("quantity")?;

    let input = match validation::new_ingredient(name, quantity) {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(%errors, "createIngredient rejected");
            return Ok(output::ingredient_payload(None));
        }
    };

    let created = settle(db.create_ingredient(&input).await)?;
    ingredient_payload(db, created).await
}

async fn update_ingredient(args: Arguments<'_>, db: &Database) -> FieldResult<Value> {
    let id = args.required_str("id")?;
    let name = args.optional_str("name")?;
    let quantity = args.optional_str("quantity")?;

    let Some(key) = resolve_key(id, EntityKind::Ingredient) else {
        return Ok(output::ingredient_payload(None));
    };

    let patch = match validation::ingredient_patch(name, quantity) {
        Ok(patch) => patch,
        Err(errors) => {
            tracing::debug!(%errors, "updateIngredient rejected");
            return Ok(output::ingredient_payload(None));
        }
    };

    let updated = settle(db.update_ingredient(key, &patch).await)?;
    ingredient_payload(db, updated).await
}

async fn delete_ingredient(args: Arguments<'_>, db: &Database) -> FieldResult<Value> {
    let id = args.required_str("id")?;
    let Some(key) = resolve_key(id, EntityKind::Ingredient) else {
        return Ok(output::ok_payload(false));
    };

    let deleted = settle(db.delete_ingredient(key).await)?;
    Ok(output::ok_payload(deleted.is_some()))
}

async fn create_recipe(args: Arguments<'_>, db: &Database) -> FieldResult<Value> {
    let name = args.required_str("name")?;
    let ids = args.required_str_list("ingredientIds")?;

    let keys: Option<Vec<i64>> = ids
        .iter()
        .map(|id| resolve_key(id, EntityKind::Ingredient))
        .collect();
    let Some(keys) = keys else {
        return Ok(output::recipe_payload(None));
    };

    let name = match validation::recipe_name(name) {
        Ok(name) => name,
        Err(errors) => {
            tracing::debug!(%errors, "createRecipe rejected");
            return Ok(output::recipe_payload(None));
        }
    };

    let created = settle(db.create_recipe(&name, &keys).await)?;
    Ok(output::recipe_payload(created.as_ref()))
}

async fn change_association(args: Arguments<'_>, db: &Database, attach: bool) -> FieldResult<Value> {
    let recipe_id = args.required_str("recipeId")?;
    let ingredient_id = args.required_str("ingredientId")?;

    let (Some(recipe_key), Some(ingredient_key)) = (
        resolve_key(recipe_id, EntityKind::Recipe),
        resolve_key(ingredient_id, EntityKind::Ingredient),
    ) else {
        return Ok(output::recipe_payload(None));
    };

    let result = if attach {
        db.add_recipe_ingredient(recipe_key, ingredient_key).await
    } else {
        db.remove_recipe_ingredient(recipe_key, ingredient_key).await
    };
    let recipe = settle(result)?;
    Ok(output::recipe_payload(recipe.as_ref()))
}
