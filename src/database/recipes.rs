// ABOUTME: Recipe table and recipe/ingredient join table operations
// ABOUTME: All-or-nothing recipe creation and idempotent association add/remove
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ingredients::ingredient_from_row;
use super::{Database, StoreError};
use recipe_core::ids::EntityKind;
use recipe_core::models::{NameFilter, Recipe, RecipeSummary};
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};
use std::collections::{BTreeMap, BTreeSet};

/// Load one recipe with its ingredient set over an existing connection or transaction
async fn load_recipe(conn: &mut SqliteConnection, key: i64) -> Result<Option<Recipe>, StoreError> {
    let Some(name) = sqlx::query_scalar::<_, String>("SELECT name FROM recipes WHERE id = $1")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?
    else {
        return Ok(None);
    };

    let rows = sqlx::query(
        r"
        SELECT i.id, i.name, i.quantity
        FROM recipe_ingredients ri
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = $1
        ORDER BY i.id
        ",
    )
    .bind(key)
    .fetch_all(&mut *conn)
    .await?;

    let ingredients = rows
        .iter()
        .map(ingredient_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Recipe {
        id: key,
        name,
        ingredients,
    }))
}

async fn recipe_exists(conn: &mut SqliteConnection, key: i64) -> Result<bool, StoreError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM recipes WHERE id = $1")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

async fn ingredient_exists(conn: &mut SqliteConnection, key: i64) -> Result<bool, StoreError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM ingredients WHERE id = $1")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Both ends of an association must exist before the join table is touched
async fn require_pair(
    conn: &mut SqliteConnection,
    recipe_key: i64,
    ingredient_key: i64,
) -> Result<(), StoreError> {
    if !recipe_exists(conn, recipe_key).await? {
        return Err(StoreError::not_found(EntityKind::Recipe, recipe_key));
    }
    if !ingredient_exists(conn, ingredient_key).await? {
        return Err(StoreError::not_found(EntityKind::Ingredient, ingredient_key));
    }
    Ok(())
}

impl Database {
    /// Create the recipes and recipe/ingredient join tables
    pub(super) async fn migrate_recipes(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients(ingredient_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a recipe with exactly the given ingredient set
    ///
    /// Every requested key must resolve to its own ingredient: a key that is
    /// unknown or repeated counts as unresolved. All keys are checked before
    /// anything is written; if any is unresolved the transaction is abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingReferences`] listing the unresolved keys
    pub async fn create_recipe(
        &self,
        name: &str,
        ingredient_keys: &[i64],
    ) -> Result<Recipe, StoreError> {
        let mut tx = self.pool.begin().await?;

        let found: BTreeSet<i64> = if ingredient_keys.is_empty() {
            BTreeSet::new()
        } else {
            let mut query = QueryBuilder::<Sqlite>::new("SELECT id FROM ingredients WHERE id IN (");
            let mut keys = query.separated(", ");
            for key in ingredient_keys {
                keys.push_bind(*key);
            }
            keys.push_unseparated(")");
            query
                .build_query_scalar::<i64>()
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect()
        };

        if found.len() < ingredient_keys.len() {
            let mut seen = BTreeSet::new();
            let missing: Vec<i64> = ingredient_keys
                .iter()
                .copied()
                .filter(|key| !found.contains(key) || !seen.insert(*key))
                .collect();
            tracing::debug!(?missing, "Recipe creation aborted: unresolved ingredients");
            return Err(StoreError::MissingReferences {
                kind: EntityKind::Ingredient,
                missing,
            });
        }

        let recipe_key: i64 =
            sqlx::query_scalar("INSERT INTO recipes (name) VALUES ($1) RETURNING id")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;

        for ingredient_key in &found {
            sqlx::query("INSERT INTO recipe_ingredients (recipe_id, ingredient_id) VALUES ($1, $2)")
                .bind(recipe_key)
                .bind(ingredient_key)
                .execute(&mut *tx)
                .await?;
        }

        let recipe = load_recipe(&mut tx, recipe_key)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Recipe, recipe_key))?;
        tx.commit().await?;

        tracing::debug!(
            recipe_id = recipe.id,
            ingredients = recipe.ingredient_count(),
            "Recipe created"
        );
        Ok(recipe)
    }

    /// Fetch a single recipe with its ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_recipe(&self, key: i64) -> Result<Option<Recipe>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        load_recipe(&mut conn, key).await
    }

    /// List recipes ordered by key, keeping those that pass `filter`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_recipes(&self, filter: &NameFilter) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query("SELECT id, name FROM recipes ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        let mut recipes: BTreeMap<i64, Recipe> = BTreeMap::new();
        for row in &rows {
            let name: String = row.try_get("name")?;
            if filter.matches(&name) {
                let id: i64 = row.try_get("id")?;
                recipes.insert(
                    id,
                    Recipe {
                        id,
                        name,
                        ingredients: Vec::new(),
                    },
                );
            }
        }

        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            r"
            SELECT ri.recipe_id, i.id, i.name, i.quantity
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id IN (",
        );
        let mut keys = query.separated(", ");
        for key in recipes.keys() {
            keys.push_bind(*key);
        }
        keys.push_unseparated(") ORDER BY ri.recipe_id, i.id");
        let links = query.build().fetch_all(&mut *conn).await?;

        for row in &links {
            let recipe_id: i64 = row.try_get("recipe_id")?;
            if let Some(recipe) = recipes.get_mut(&recipe_id) {
                recipe.ingredients.push(ingredient_from_row(row)?);
            }
        }

        Ok(recipes.into_values().collect())
    }

    /// Recipes using each of the given ingredients, keyed by ingredient
    ///
    /// Ingredients used by no recipe map to an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn recipes_using_ingredients(
        &self,
        ingredient_keys: &[i64],
    ) -> Result<BTreeMap<i64, Vec<RecipeSummary>>, StoreError> {
        let mut used_by: BTreeMap<i64, Vec<RecipeSummary>> = ingredient_keys
            .iter()
            .map(|key| (*key, Vec::new()))
            .collect();
        if used_by.is_empty() {
            return Ok(used_by);
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            r"
            SELECT ri.ingredient_id, r.id, r.name
            FROM recipe_ingredients ri
            JOIN recipes r ON r.id = ri.recipe_id
            WHERE ri.ingredient_id IN (",
        );
        let mut keys = query.separated(", ");
        for key in used_by.keys() {
            keys.push_bind(*key);
        }
        keys.push_unseparated(") ORDER BY ri.ingredient_id, r.id");
        let rows = query.build().fetch_all(&self.pool).await?;

        for row in &rows {
            let ingredient_id: i64 = row.try_get("ingredient_id")?;
            if let Some(recipes) = used_by.get_mut(&ingredient_id) {
                recipes.push(RecipeSummary {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                });
            }
        }
        Ok(used_by)
    }

    /// Attach an ingredient to a recipe; attaching twice is not an error
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if either record is missing
    pub async fn add_recipe_ingredient(
        &self,
        recipe_key: i64,
        ingredient_key: i64,
    ) -> Result<Recipe, StoreError> {
        let mut tx = self.pool.begin().await?;
        require_pair(&mut tx, recipe_key, ingredient_key).await?;

        sqlx::query(
            "INSERT OR IGNORE INTO recipe_ingredients (recipe_id, ingredient_id) VALUES ($1, $2)",
        )
        .bind(recipe_key)
        .bind(ingredient_key)
        .execute(&mut *tx)
        .await?;

        let recipe = load_recipe(&mut tx, recipe_key)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Recipe, recipe_key))?;
        tx.commit().await?;
        Ok(recipe)
    }

    /// Detach an ingredient from a recipe; detaching an absent link is not an error
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if either record is missing
    pub async fn remove_recipe_ingredient(
        &self,
        recipe_key: i64,
        ingredient_key: i64,
    ) -> Result<Recipe, StoreError> {
        let mut tx = self.pool.begin().await?;
        require_pair(&mut tx, recipe_key, ingredient_key).await?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1 AND ingredient_id = $2")
            .bind(recipe_key)
            .bind(ingredient_key)
            .execute(&mut *tx)
            .await?;

        let recipe = load_recipe(&mut tx, recipe_key)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Recipe, recipe_key))?;
        tx.commit().await?;
        Ok(recipe)
    }

    /// Number of stored recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_recipes(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
