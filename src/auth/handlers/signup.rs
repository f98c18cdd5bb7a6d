/**
 * Signup Handler
 *
 * User registration for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Hash the password with bcrypt (DEFAULT_COST)
 * 2. Insert the user row; the schema's UNIQUE constraint on email decides
 *    duplicates, so two concurrent signups for one email yield exactly one
 *    success and one 409
 * 3. Return the new user id
 *
 * Registration does not consult the whitelist - an account can exist before
 * its email is permitted to log in.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{SignupRequest, SignupResponse};
use crate::auth::users;
use crate::error::{is_unique_violation, ApiError};
use crate::server::state::AppState;

/// Sign up handler
///
/// # Errors
///
/// * `409 Conflict` - a user with this email already exists
/// * `500 Internal Server Error` - hashing or store failure
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    tracing::info!("Signup request for email: {}", request.email);

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;

    let user = users::create_user(&state.pool, &request.email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!("Email already registered: {}", request.email);
                ApiError::conflict("Email already registered")
            } else {
                e.into()
            }
        })?;

    tracing::info!("User created: {}", user.email);

    Ok(Json(SignupResponse {
        user_id: user.id.to_string(),
    }))
}
