//! Routes Module
//!
//! HTTP route configuration and router assembly.
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports
//! ├── router.rs     - Final router assembly (tracing, fallback, state)
//! └── api_routes.rs - API route groups (public vs. auth-protected)
//! ```

/// Final router assembly
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
