//! Authentication HTTP Handlers
//!
//! ```text
//! handlers/
//! ├── mod.rs            - Handler exports
//! ├── types.rs          - Request/response types
//! ├── signup.rs         - User registration
//! ├── login.rs          - User authentication
//! ├── me.rs             - Current-user lookup
//! ├── reset.rs          - Password reset flow (request/verify/apply)
//! └── delete_account.rs - Account deletion
//! ```

/// Request and response types
pub mod types;

/// User registration handler
pub mod signup;

/// User authentication handler
pub mod login;

/// Current-user handler
pub mod me;

/// Password reset handlers
pub mod reset;

/// Account deletion handler
pub mod delete_account;

// Re-export handlers for route configuration
pub use delete_account::delete_account;
pub use login::login;
pub use me::get_me;
pub use reset::{request_reset, reset_password, verify_reset};
pub use signup::signup;
