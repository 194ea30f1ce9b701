// ABOUTME: Field-level validation run before any create or update reaches the store
// ABOUTME: Trims input, enforces required fields and character-length limits

//! Input validation
//!
//! Uniqueness is not checked here: the store enforces it at write time and
//! the API maps the violation back onto the `name` field.

use recipe_core::constants::limits;
use recipe_core::models::{IngredientPatch, NewIngredient};
use serde::Serialize;
use std::fmt;

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Input field name as the client sent it
    pub field: &'static str,
    /// What was wrong
    pub message: String,
}

/// All failed checks for one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
pub struct ValidationErrors {
    /// Individual field failures, in check order
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// True if `field` failed at least one check
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "Validation failed ({})", parts.join("; "))
    }
}

fn check_length(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    let len = value.chars().count();
    if len > max {
        errors.push(
            field,
            format!("Ensure this field has no more than {max} characters (it has {len})."),
        );
    }
}

/// Trim and require a non-blank value
fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    max: usize,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "This field may not be blank.");
    } else {
        check_length(errors, field, trimmed, max);
    }
    trimmed.to_owned()
}

/// Trim an optional value; blank is allowed
fn optional(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    value.map(|v| {
        let trimmed = v.trim();
        check_length(errors, field, trimmed, max);
        trimmed.to_owned()
    })
}

/// Validate input for `createIngredient`
///
/// # Errors
///
/// Returns every failed check for `name` and `quantity`
pub fn new_ingredient(name: &str, quantity: Option<&str>) -> Result<NewIngredient, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let name = required(&mut errors, "name", name, limits::INGREDIENT_NAME_MAX_LEN);
    let quantity = optional(
        &mut errors,
        "quantity",
        quantity,
        limits::INGREDIENT_QUANTITY_MAX_LEN,
    );
    errors.into_result(NewIngredient { name, quantity })
}

/// Validate input for `updateIngredient`; omitted fields stay omitted
///
/// # Errors
///
/// Returns every failed check for the supplied fields
pub fn ingredient_patch(
    name: Option<&str>,
    quantity: Option<&str>,
) -> Result<IngredientPatch, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let name = name.map(|n| required(&mut errors, "name", n, limits::INGREDIENT_NAME_MAX_LEN));
    let quantity = optional(
        &mut errors,
        "quantity",
        quantity,
        limits::INGREDIENT_QUANTITY_MAX_LEN,
    );
    errors.into_result(IngredientPatch { name, quantity })
}

/// Validate a recipe name for `createRecipe`
///
/// # Errors
///
/// Returns the failed checks for `name`
pub fn recipe_name(name: &str) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let name = required(&mut errors, "name", name, limits::RECIPE_NAME_MAX_LEN);
    errors.into_result(name)
}

/// Validate a username for account creation
///
/// # Errors
///
/// Returns the failed checks for `username`
pub fn username(username: &str) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let username = required(&mut errors, "username", username, limits::USERNAME_MAX_LEN);
    if username.chars().any(char::is_whitespace) {
        errors.push("username", "Username may not contain whitespace.");
    }
    errors.into_result(username)
}
