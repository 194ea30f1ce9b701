// ABOUTME: HTTP middleware for request authentication and cross-origin access
// ABOUTME: Resolves the Authorization header once per request and configures CORS

/// Per-request authentication state resolution
pub mod auth;
/// CORS layer configuration
pub mod cors;

pub use auth::{AuthMiddleware, AuthState, AuthenticatedUser};
pub use cors::setup_cors;
