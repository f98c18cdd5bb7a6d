/**
 * Login Handler
 *
 * User authentication for POST /api/auth/login.
 *
 * The coordinator enforces the check order: whitelist gate first (403 with
 * a whitelist-specific message), then credentials (401, one generic message
 * whether the user is missing or the password is wrong).
 */

use axum::{extract::State, response::Json};

use crate::auth::account;
use crate::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `403 Forbidden` - email is not whitelisted (access policy, not identity)
/// * `401 Unauthorized` - unknown user or wrong password, indistinguishably
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.email);

    let token = account::login(
        &state.pool,
        &state.session_keys,
        &request.email,
        &request.password,
    )
    .await?;

    Ok(Json(LoginResponse { token }))
}
