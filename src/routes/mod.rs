// ABOUTME: Route module organization for the recipe graph server HTTP endpoints
// ABOUTME: The document endpoint plus health and readiness probes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the recipe graph server
//!
//! Each module holds only route definitions and thin handlers that delegate
//! to the API executor or the store.

/// Query/mutation document endpoint
pub mod graphql;
/// Health check and readiness routes
pub mod health;

pub use graphql::GraphRoutes;
pub use health::HealthRoutes;
