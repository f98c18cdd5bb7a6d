//! Error Module
//!
//! Classified error types for the gateway and their conversion to HTTP
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - `ApiError` definition and constructors
//! └── conversion.rs - `IntoResponse` implementation
//! ```
//!
//! Every boundary operation returns an `ApiError` on failure; the
//! `IntoResponse` impl renders it as `{"error": ..., "status": ...}` with
//! the matching status code. Atomic units roll back and surface a single
//! classified error; physical-file-deletion failures are downgraded to a
//! reported result field instead of an error (see `files::registry`).

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{is_foreign_key_violation, is_unique_violation, ApiError};
