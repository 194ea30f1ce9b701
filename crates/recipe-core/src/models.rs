// ABOUTME: Core data models for ingredients, recipes and API users
// ABOUTME: Includes write inputs (NewIngredient, IngredientPatch) and the name filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::GlobalId;

/// A stored ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Storage key
    pub id: i64,
    /// Unique display name
    pub name: String,
    /// Free-form amount such as "2 cups"
    pub quantity: Option<String>,
}

impl Ingredient {
    /// Opaque id exposed to clients
    #[must_use]
    pub const fn global_id(&self) -> GlobalId {
        GlobalId::ingredient(self.id)
    }
}

/// A stored recipe together with its ingredient set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Storage key
    pub id: i64,
    /// Display name, not unique
    pub name: String,
    /// Ingredients attached through the join table, ordered by ingredient key
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Opaque id exposed to clients
    #[must_use]
    pub const fn global_id(&self) -> GlobalId {
        GlobalId::recipe(self.id)
    }

    /// Size of the ingredient set at read time
    #[must_use]
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }
}

/// A recipe named from the ingredient side of the association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Storage key
    pub id: i64,
    /// Display name
    pub name: String,
}

impl RecipeSummary {
    /// Opaque id exposed to clients
    #[must_use]
    pub const fn global_id(&self) -> GlobalId {
        GlobalId::recipe(self.id)
    }
}

/// Validated input for creating an ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    /// Trimmed, non-empty name
    pub name: String,
    /// Trimmed quantity
    pub quantity: Option<String>,
}

/// Validated partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientPatch {
    /// Replacement name
    pub name: Option<String>,
    /// Replacement quantity
    pub quantity: Option<String>,
}

impl IngredientPatch {
    /// True when the patch would not change anything
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none()
    }
}

/// Case-insensitive substring filter on `name`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    /// Substring to look for; `None` matches everything
    pub name_contains: Option<String>,
}

impl NameFilter {
    /// Filter matching names that contain `needle`, ignoring case
    #[must_use]
    pub fn contains(needle: impl Into<String>) -> Self {
        Self {
            name_contains: Some(needle.into()),
        }
    }

    /// Check a name against the filter in memory
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name_contains
            .as_deref()
            .is_none_or(|needle| name.to_lowercase().contains(&needle.to_lowercase()))
    }
}

/// An account allowed to obtain tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage key
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Inactive users cannot obtain tokens
    pub is_active: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Last successful `tokenAuth`
    pub last_login: Option<DateTime<Utc>>,
}
