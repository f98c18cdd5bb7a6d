/**
 * Server Initialization
 *
 * Builds the application from configuration:
 *
 * 1. Connect the database pool and run migrations
 * 2. Create the storage directory if missing
 * 3. Build the session key pair from the configured secret
 * 4. Assemble the router around the shared state
 *
 * Unlike optional services that degrade gracefully, the pool and the
 * storage directory are required - startup fails fast if either cannot be
 * set up.
 */

use std::sync::Arc;

use axum::Router;

use crate::auth::sessions::{SessionKeys, SESSION_TTL_SECS};
use crate::files::storage::FileStorage;
use crate::routes::router::create_router;
use crate::server::config::{connect_pool, Config};
use crate::server::state::AppState;

/// Create and configure the Axum application.
pub async fn create_app(config: Config) -> Result<Router, Box<dyn std::error::Error>> {
    tracing::info!("Initializing xfgate server");

    let pool = connect_pool(&config.database_url).await?;

    let storage = FileStorage::new(config.storage_dir.clone());
    storage.ensure_root().await?;
    tracing::info!("Storage directory ready: {}", storage.root().display());

    let session_keys = Arc::new(SessionKeys::new(&config.jwt_secret, SESSION_TTL_SECS));

    let state = AppState {
        pool,
        session_keys,
        storage,
        max_upload_bytes: config.max_upload_bytes,
    };

    tracing::info!("Router configured");

    Ok(create_router(state))
}
