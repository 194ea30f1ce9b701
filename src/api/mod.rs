// ABOUTME: Query/mutation API over ingredients, recipes, and tokens
// ABOUTME: A typed router with one handler per top-level field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Query/Mutation API
//!
//! Requests are JSON documents naming top-level fields with their
//! arguments. The executor looks each field up on the `Query` or `Mutation`
//! root, applies the auth gate, and dispatches to the field's handler.
//! Results are keyed by alias or name; per-field failures are collected in
//! an `errors` list next to `data`.

/// Typed argument access
pub mod arguments;
/// Token field handlers
pub mod auth_fields;
/// Request and response documents
pub mod document;
/// Document execution
pub mod executor;
/// Field resolution outcomes
pub mod failure;
/// Gated write handlers
pub mod mutations;
/// Entity rendering and selection projection
pub mod output;
/// Read handlers
pub mod queries;
/// Root type field tables
pub mod schema;

pub use document::{Document, DocumentResponse, FieldRequest, GraphError, OperationType};
pub use executor::Executor;
pub use schema::{Field, MutationField, QueryField};
