/**
 * Delete Account Handler
 *
 * DELETE /api/auth/account - removes the caller's account after password
 * confirmation. Sits behind the auth middleware; the confirming password in
 * the body must match the authenticated user's stored hash.
 *
 * The deletion itself (all reset tokens, then the user row) is one atomic
 * unit in the coordinator; a failure anywhere rolls everything back.
 */

use axum::{extract::State, response::Json};

use crate::auth::account;
use crate::auth::handlers::types::{DeleteAccountRequest, OkResponse};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Delete account handler
///
/// # Errors
///
/// * `401 Unauthorized` - confirming password does not match (nothing is
///   deleted)
/// * `404 Not Found` - the account no longer exists
pub async fn delete_account(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<DeleteAccountRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    tracing::info!("Account deletion requested by: {}", user.email);

    account::delete_account(&state.pool, user.user_id, &request.password).await?;

    Ok(Json(OkResponse::new()))
}
