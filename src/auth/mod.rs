//! Authentication Module
//!
//! User identity, session tokens, password-reset tokens, and the
//! coordinator that sequences them.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - Session token (JWT) issue/verify
//! ├── reset_tokens.rs - Single-use password-reset token ledger
//! ├── account.rs      - Lifecycle coordination (login, deletion, reset)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage and never serialized
//! - Session tokens are HS256 JWTs with a 1 hour expiry; the signing key is
//!   explicit startup configuration
//! - Reset tokens are 32 random bytes, single-use, 15 minute expiry
//! - Credential failures return one generic 401 (no information leakage);
//!   whitelist rejections are a distinct 403

/// User data model and database operations
pub mod users;

/// Session token management
pub mod sessions;

/// Password-reset token ledger
pub mod reset_tokens;

/// Account lifecycle coordination
pub mod account;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
pub use handlers::{delete_account, get_me, login, request_reset, reset_password, signup, verify_reset};
pub use sessions::SessionKeys;
