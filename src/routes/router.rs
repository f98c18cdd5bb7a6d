/**
 * Router Assembly
 *
 * Combines the API route groups into the final Axum router, adds request
 * tracing and the 404 fallback, and binds the shared state.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let router = configure_api_routes(&state);

    router
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .with_state(state)
}
