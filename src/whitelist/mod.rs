//! Whitelist Module
//!
//! The access whitelist: the set of emails permitted to authenticate,
//! independent of whether an account exists. Login checks membership before
//! anything else, so removing an email locks a registered user out
//! immediately.
//!
//! ```text
//! whitelist/
//! ├── mod.rs      - Module exports
//! ├── store.rs    - Entry model and database operations
//! └── handlers.rs - HTTP handlers (all auth-protected)
//! ```

/// Entry model and database operations
pub mod store;

/// HTTP handlers for whitelist management
pub mod handlers;

pub use handlers::{add_whitelist_entry, list_whitelist, remove_whitelist_entry};
pub use store::WhitelistEntry;
