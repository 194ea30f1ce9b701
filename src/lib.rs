// ABOUTME: Main library entry point for the recipe graph server
// ABOUTME: Ingredient and recipe CRUD over a query/mutation document API with JWT-gated writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Graph Server
//!
//! A small data API for ingredients and recipes. Clients post JSON documents
//! naming top-level fields (`allIngredients`, `createRecipe`, ...) and get
//! back a `data` object mirroring the request plus an `errors` list.
//!
//! ## Features
//!
//! - **Entity store**: `SQLite` via `sqlx`, with a many-to-many join between
//!   recipes and ingredients and cascading detach on ingredient delete
//! - **Validation**: required fields, character limits, and trimming before
//!   any write
//! - **Token auth**: HS256 JWTs issued by `tokenAuth`, renewable within a
//!   refresh window; every write field requires one
//! - **Opaque ids**: entities are addressed by base64 `Kind:key` ids
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_graph_server::config::ServerConfig;
//! use recipe_graph_server::server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = server::build_resources(config).await?;
//!     server::run(resources).await
//! }
//! ```

/// Query/mutation document API
pub mod api;

/// `JWT` issue, verification, and refresh
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Entity store
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Request authentication and CORS
pub mod middleware;

/// Shared server resources
pub mod resources;

/// `HTTP` routes
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

/// Input validation
pub mod validation;

pub use recipe_core::{constants, ids, models};
