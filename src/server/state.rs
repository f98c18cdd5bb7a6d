/**
 * Application State
 *
 * Central state container for the Axum application. Everything here is
 * created once at startup and shared read-only across handlers:
 *
 * - the database pool (the only source of transactional grouping)
 * - the session key pair (explicit configuration, never ambient env)
 * - the blob storage handle
 * - the upload size cap
 *
 * `FromRef` impls let handlers extract the specific piece they need instead
 * of the whole state.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::sessions::SessionKeys;
use crate::files::storage::FileStorage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: SqlitePool,

    /// HS256 session key pair, built from `Config` at startup
    pub session_keys: Arc<SessionKeys>,

    /// Physical blob store handle
    pub storage: FileStorage,

    /// Maximum accepted upload body size in bytes
    pub max_upload_bytes: usize,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<SessionKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_keys.clone()
    }
}

impl FromRef<AppState> for FileStorage {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.storage.clone()
    }
}
