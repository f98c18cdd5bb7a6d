//! Middleware Module
//!
//! Request-processing middleware.

/// Bearer-token authentication middleware and extractor
pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
