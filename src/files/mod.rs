//! Files Module
//!
//! The file registry: a database record (id, unique filename, path) paired
//! with a physical blob on disk. The record is authoritative; the blob is
//! best-effort and the two can disagree (deletion reports both outcomes
//! independently).
//!
//! ```text
//! files/
//! ├── mod.rs      - Module exports
//! ├── registry.rs - FileRecord model and database operations
//! ├── storage.rs  - Physical blob store
//! └── handlers.rs - HTTP handlers (upload/list/delete)
//! ```

/// FileRecord model and database operations
pub mod registry;

/// Physical blob store
pub mod storage;

/// HTTP handlers for file endpoints
pub mod handlers;

pub use handlers::{delete_file, list_files, upload_file};
pub use registry::{FileDeleteOutcome, FileRecord};
pub use storage::FileStorage;
