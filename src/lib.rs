//! XFGate - Authenticated Account & File Gateway
//!
//! XFGate is an HTTP gateway for user accounts, password recovery, an email
//! whitelist gate, and a file registry backed by a database plus a physical
//! file store.
//!
//! # Overview
//!
//! The core is the account-lifecycle and file-registry consistency engine:
//! a credential store, a time-bounded reset-token ledger, an access
//! whitelist, and a dual-state file record (database row + on-disk blob)
//! are kept mutually consistent under concurrent requests and partial
//! failures. All transactional grouping comes from the backing store; all
//! uniqueness rules are schema constraints, never read-then-write checks.
//!
//! # Module Structure
//!
//! - **`auth`** - users, session tokens, reset tokens, lifecycle
//!   coordination, and their HTTP handlers
//! - **`whitelist`** - the access whitelist and its handlers
//! - **`files`** - file registry, blob storage, and their handlers
//! - **`middleware`** - bearer-token authentication middleware
//! - **`routes`** - router assembly
//! - **`server`** - configuration, shared state, application assembly
//! - **`error`** - the classified `ApiError` and its HTTP conversion

/// Authentication and account lifecycle
pub mod auth;

/// Classified error types
pub mod error;

/// File registry and blob storage
pub mod files;

/// Request middleware
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup and state
pub mod server;

/// Access whitelist
pub mod whitelist;

// Re-export commonly used types
pub use error::ApiError;
pub use routes::create_router;
pub use server::{AppState, Config};

#[cfg(test)]
pub(crate) mod testing;
