// ABOUTME: Unified error handling re-exported from recipe-core with server-side conversions
// ABOUTME: Maps store, validation, and JWT failures onto AppError and ErrorCode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The types live in `recipe-core`; this module adds the conversions from
//! server-side error enums so handlers can use `?` and still produce a
//! consistent `ErrorResponse` body.

pub use recipe_core::errors::*;

use crate::auth::JwtValidationError;
use crate::database::StoreError;

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { kind, key } => Self::not_found(format!("{kind} {key}")),
            StoreError::UniqueViolation { field } => Self::new(
                ErrorCode::ResourceAlreadyExists,
                format!("{field} is already in use"),
            ),
            StoreError::MissingReferences { kind, missing } => Self::not_found(format!(
                "{} {kind} reference(s)",
                missing.len()
            ))
            .with_details(serde_json::json!({ "missing": missing })),
            StoreError::Database(source) => {
                Self::database(format!("Database operation failed: {source}")).with_source(source)
            }
        }
    }
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        Self::invalid_token(error.to_string())
    }
}
