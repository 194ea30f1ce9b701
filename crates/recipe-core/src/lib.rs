// ABOUTME: Core types and constants for the recipe graph API
// ABOUTME: Foundation crate with error handling, opaque ids, models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Shared types for the recipe graph server. This crate changes rarely, so
//! keeping it separate from the server crate keeps incremental builds cheap.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the JSON error body
//! - **ids**: opaque global identifiers (`GlobalId`) exposed by the API
//! - **models**: `Ingredient`, `Recipe`, `User` and their write inputs
//! - **constants**: field limits, defaults and service names

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Opaque `(kind, key)` identifiers exposed to API clients
pub mod ids;

/// Core data models
pub mod models;

/// Application constants organized by domain
pub mod constants;
