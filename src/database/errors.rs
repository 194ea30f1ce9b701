// ABOUTME: Structured error types for entity store operations
// ABOUTME: Separates expected outcomes (not found, unique, missing refs) from store failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_core::ids::EntityKind;

/// Errors returned by [`super::Database`] operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed record does not exist
    #[error("{kind} {key} not found")]
    NotFound {
        /// Kind of the missing record
        kind: EntityKind,
        /// Storage key that did not resolve
        key: i64,
    },

    /// A unique column already holds the value
    #[error("{field} must be unique")]
    UniqueViolation {
        /// Column that rejected the write
        field: &'static str,
    },

    /// Some referenced records do not exist; nothing was written
    #[error("{} {kind} reference(s) do not exist", .missing.len())]
    MissingReferences {
        /// Kind of the referenced records
        kind: EntityKind,
        /// Keys that did not resolve
        missing: Vec<i64>,
    },

    /// The store itself failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Not-found error for the given record
    #[must_use]
    pub const fn not_found(kind: EntityKind, key: i64) -> Self {
        Self::NotFound { kind, key }
    }

    /// True for the outcomes an API caller can cause (as opposed to store failures)
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        !matches!(self, Self::Database(_))
    }

    /// Build a mapper that turns a unique-constraint failure into [`StoreError::UniqueViolation`]
    pub(super) fn unique_on(field: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |error| match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::UniqueViolation { field }
            }
            _ => Self::Database(error),
        }
    }
}
