// ABOUTME: Ingredient table operations: create, read, filter, patch, and cascading delete
// ABOUTME: Unique name violations surface as StoreError::UniqueViolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Database, StoreError};
use recipe_core::ids::EntityKind;
use recipe_core::models::{Ingredient, IngredientPatch, NameFilter, NewIngredient};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

pub(super) fn ingredient_from_row(row: &SqliteRow) -> Result<Ingredient, sqlx::Error> {
    Ok(Ingredient {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        quantity: row.try_get("quantity")?,
    })
}

impl Database {
    /// Create the ingredients table
    pub(super) async fn migrate_ingredients(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                quantity TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new ingredient
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the name is taken
    pub async fn create_ingredient(&self, input: &NewIngredient) -> Result<Ingredient, StoreError> {
        let row = sqlx::query(
            r"
            INSERT INTO ingredients (name, quantity)
            VALUES ($1, $2)
            RETURNING id, name, quantity
            ",
        )
        .bind(&input.name)
        .bind(&input.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::unique_on("name"))?;

        let ingredient = ingredient_from_row(&row)?;
        tracing::debug!(ingredient_id = ingredient.id, "Ingredient created");
        Ok(ingredient)
    }

    /// Fetch a single ingredient
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_ingredient(&self, key: i64) -> Result<Option<Ingredient>, StoreError> {
        let row = sqlx::query("SELECT id, name, quantity FROM ingredients WHERE id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(ingredient_from_row).transpose()?)
    }

    /// List ingredients ordered by key, keeping those that pass `filter`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_ingredients(&self, filter: &NameFilter) -> Result<Vec<Ingredient>, StoreError> {
        let rows = sqlx::query("SELECT id, name, quantity FROM ingredients ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut ingredients = Vec::with_capacity(rows.len());
        for row in &rows {
            let ingredient = ingredient_from_row(row)?;
            if filter.matches(&ingredient.name) {
                ingredients.push(ingredient);
            }
        }
        Ok(ingredients)
    }

    /// Apply a partial update; fields absent from `patch` keep their value
    ///
    /// An empty patch writes nothing and returns the current record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown key and
    /// [`StoreError::UniqueViolation`] if the new name is taken
    pub async fn update_ingredient(
        &self,
        key: i64,
        patch: &IngredientPatch,
    ) -> Result<Ingredient, StoreError> {
        if patch.is_empty() {
            return self
                .get_ingredient(key)
                .await?
                .ok_or_else(|| StoreError::not_found(EntityKind::Ingredient, key));
        }

        let row = sqlx::query(
            r"
            UPDATE ingredients
            SET name = COALESCE($2, name),
                quantity = COALESCE($3, quantity)
            WHERE id = $1
            RETURNING id, name, quantity
            ",
        )
        .bind(key)
        .bind(&patch.name)
        .bind(&patch.quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::unique_on("name"))?
        .ok_or_else(|| StoreError::not_found(EntityKind::Ingredient, key))?;

        Ok(ingredient_from_row(&row)?)
    }

    /// Delete an ingredient and detach it from every recipe, atomically
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown key
    pub async fn delete_ingredient(&self, key: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query("DELETE FROM recipe_ingredients WHERE ingredient_id = $1")
            .bind(key)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(key)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::not_found(EntityKind::Ingredient, key));
        }

        tx.commit().await?;
        tracing::debug!(ingredient_id = key, detached, "Ingredient deleted");
        Ok(())
    }

    /// Number of stored ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_ingredients(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
