// ABOUTME: Request and response document types for the query/mutation endpoint
// ABOUTME: A document is an operation type plus an ordered list of requested fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Root type a document addresses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Read fields
    #[default]
    Query,
    /// Write and token fields
    Mutation,
}

impl OperationType {
    /// Type name used in error messages
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("query"),
            Self::Mutation => f.write_str("mutation"),
        }
    }
}

/// One requested top-level field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldRequest {
    /// Field name, e.g. `allIngredients`
    pub name: String,
    /// Key to use in `data` instead of `name`
    #[serde(default)]
    pub alias: Option<String>,
    /// Field arguments
    #[serde(default)]
    pub arguments: Map<String, Value>,
    /// Entity keys to return; everything when absent
    #[serde(default)]
    pub selection: Option<Vec<String>>,
}

impl FieldRequest {
    /// Request a field with no arguments
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an argument
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Set the alias
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Restrict the returned keys
    #[must_use]
    pub fn select(mut self, keys: &[&str]) -> Self {
        self.selection = Some(keys.iter().map(|k| (*k).to_owned()).collect());
        self
    }

    /// Key this field's result is stored under in `data`
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A complete request document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Root type; defaults to `query`
    #[serde(default)]
    pub operation: OperationType,
    /// Fields in execution order
    pub fields: Vec<FieldRequest>,
}

impl Document {
    /// A query document
    #[must_use]
    pub const fn query(fields: Vec<FieldRequest>) -> Self {
        Self {
            operation: OperationType::Query,
            fields,
        }
    }

    /// A mutation document
    #[must_use]
    pub const fn mutation(fields: Vec<FieldRequest>) -> Self {
        Self {
            operation: OperationType::Mutation,
            fields,
        }
    }

    /// Reject documents that cannot be executed at all
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::InvalidInput`] for an empty field list, a blank
    /// field name, or two fields sharing a response key
    pub fn check(&self) -> Result<(), AppError> {
        if self.fields.is_empty() {
            return Err(AppError::invalid_input("Document must request at least one field"));
        }

        let mut keys = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(AppError::invalid_input("Field name must not be empty"));
            }
            if !keys.insert(field.response_key()) {
                return Err(AppError::invalid_input(format!(
                    "Duplicate response key '{}'; use distinct aliases",
                    field.response_key()
                )));
            }
        }
        Ok(())
    }
}

/// One entry of the response `errors` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphError {
    /// Human-readable message
    pub message: String,
    /// Stable error code
    pub code: ErrorCode,
    /// Response key of the failing field
    pub path: Vec<String>,
}

/// Response body for a well-formed document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentResponse {
    /// One entry per requested field, keyed by alias or name
    pub data: Map<String, Value>,
    /// Per-field failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphError>,
}

impl DocumentResponse {
    /// Result of a field by response key
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Errors reported for a response key
    pub fn errors_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a GraphError> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.path.first().is_some_and(|p| p == key))
    }
}
