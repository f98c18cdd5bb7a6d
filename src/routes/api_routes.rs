/**
 * API Route Configuration
 *
 * Routes split into two groups:
 *
 * # Public
 * - `POST /api/auth/signup`               - user registration
 * - `POST /api/auth/login`                - login (whitelist-gated)
 * - `POST /api/auth/request-reset`        - issue a reset token
 * - `GET  /api/auth/verify-reset/{token}` - check a reset token
 * - `POST /api/auth/reset-password`       - consume a reset token
 * - `GET  /api/files`                     - list file records
 * - `DELETE /api/files/{id}`              - delete a file
 *
 * # Protected (bearer token via auth middleware)
 * - `GET    /api/auth/me`                 - current user
 * - `DELETE /api/auth/account`            - delete own account
 * - `POST   /api/files/upload`            - upload a file
 * - `POST   /api/whitelist`               - add whitelist entry
 * - `GET    /api/whitelist`               - list whitelist
 * - `DELETE /api/whitelist/{email}`       - remove whitelist entry
 *
 * File list/delete being public while upload is gated mirrors the original
 * design (see DESIGN.md). The upload route additionally carries the body
 * size limit from configuration.
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::auth::handlers::{
    delete_account, get_me, login, request_reset, reset_password, signup, verify_reset,
};
use crate::files::handlers::{delete_file, list_files, upload_file};
use crate::middleware::auth::auth_middleware;
use crate::server::state::AppState;
use crate::whitelist::handlers::{add_whitelist_entry, list_whitelist, remove_whitelist_entry};

/// Assemble all API routes.
///
/// The protected group gets the auth middleware as a `route_layer` so it
/// only runs for routes that actually matched.
pub fn configure_api_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/request-reset", post(request_reset))
        .route("/api/auth/verify-reset/{token}", get(verify_reset))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/files", get(list_files))
        .route("/api/files/{id}", delete(delete_file));

    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/account", delete(delete_account))
        .route(
            "/api/files/upload",
            post(upload_file).layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route(
            "/api/whitelist",
            post(add_whitelist_entry).get(list_whitelist),
        )
        .route("/api/whitelist/{email}", delete(remove_whitelist_entry))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    public.merge(protected)
}
