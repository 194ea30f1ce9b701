// ABOUTME: System-wide constants for the recipe graph API
// ABOUTME: Field limits, configuration defaults, service names and auth header prefixes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded limits and defaults. Environment overrides live in the server
//! crate's `config::environment` module.

/// Service identity used in logs and as the JWT audience
pub mod service_names {
    /// Name of the server binary and logging service
    pub const RECIPE_GRAPH_SERVER: &str = "recipe-graph-server";

    /// Audience claim written into every issued token
    pub const TOKEN_AUDIENCE: &str = "recipe-graph-api";
}

/// Field length limits, counted in characters
pub mod limits {
    /// Maximum length of an ingredient name
    pub const INGREDIENT_NAME_MAX_LEN: usize = 100;

    /// Maximum length of an ingredient quantity
    pub const INGREDIENT_QUANTITY_MAX_LEN: usize = 50;

    /// Maximum length of a recipe name
    pub const RECIPE_NAME_MAX_LEN: usize = 200;

    /// Maximum length of a username
    pub const USERNAME_MAX_LEN: usize = 150;

    /// Default request body limit in bytes (1 MiB)
    pub const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
}

/// Configuration defaults
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;

    /// Default bind host
    pub const HOST: &str = "127.0.0.1";

    /// Default `SQLite` database location
    pub const DATABASE_URL: &str = "sqlite:./data/recipes.db";

    /// Default pool size for file-backed databases
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;

    /// Access token lifetime (5 minutes)
    pub const JWT_EXPIRY_SECONDS: i64 = 300;

    /// Refresh window measured from the original issue time (7 days)
    pub const JWT_REFRESH_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

    /// Allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Accepted `Authorization` header schemes
pub mod auth_schemes {
    /// Standard bearer scheme
    pub const BEARER: &str = "Bearer";

    /// Legacy scheme used by older clients
    pub const JWT: &str = "JWT";
}

/// User-facing error messages shared by the auth gate and the API
pub mod error_messages {
    /// Credentials did not match an active user
    pub const INVALID_CREDENTIALS: &str = "Please enter valid credentials";

    /// Token signature verification or decoding failed
    pub const INVALID_SIGNATURE: &str = "Error decoding signature";

    /// Token `exp` is in the past
    pub const SIGNATURE_EXPIRED: &str = "Signature has expired";

    /// Token is past its refresh window
    pub const REFRESH_EXPIRED: &str = "Refresh has expired";

    /// Gated field requested without credentials
    pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action";
}
