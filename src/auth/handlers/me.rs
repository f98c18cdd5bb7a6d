/**
 * Get Current User Handler
 *
 * GET /api/auth/me - returns the caller's account info. Sits behind the
 * auth middleware; the handler only has to read what the middleware
 * attached.
 */

use axum::response::Json;

use crate::auth::handlers::types::UserResponse;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Get current user handler
pub async fn get_me(AuthUser(user): AuthUser) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse {
        id: user.user_id.to_string(),
        email: user.email,
    }))
}
