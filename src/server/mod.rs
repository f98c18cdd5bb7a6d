//! Server Module
//!
//! Configuration, shared state and application assembly.
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── config.rs - Env-derived configuration + pool setup
//! ├── state.rs  - AppState and FromRef impls
//! └── init.rs   - Application assembly
//! ```

/// Env-derived configuration and pool setup
pub mod config;

/// Shared application state
pub mod state;

/// Application assembly
pub mod init;

pub use config::Config;
pub use init::create_app;
pub use state::AppState;
