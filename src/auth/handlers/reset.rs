/**
 * Password Reset Handlers
 *
 * Three endpoints cover the reset flow:
 *
 * 1. POST /api/auth/request-reset - issue a 15-minute single-use token for
 *    an email. The token comes back in the response body (in-band delivery,
 *    preserved from the original design - see DESIGN.md).
 * 2. GET /api/auth/verify-reset/{token} - non-consuming validity check.
 * 3. POST /api/auth/reset-password - consume the token and apply the new
 *    password as one atomic unit.
 *
 * All token failures answer 400 with one merged "invalid or expired"
 * message; missing, expired and already-used are indistinguishable.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::auth::handlers::types::{
    OkResponse, RequestResetRequest, RequestResetResponse, ResetPasswordRequest,
    VerifyResetResponse,
};
use crate::auth::{account, reset_tokens};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Request a password reset token
///
/// # Errors
/// * `404 Not Found` - no account with that email
pub async fn request_reset(
    State(state): State<AppState>,
    Json(request): Json<RequestResetRequest>,
) -> Result<Json<RequestResetResponse>, ApiError> {
    tracing::info!("Password reset requested for: {}", request.email);

    let (token, expires_at) = account::request_password_reset(&state.pool, &request.email).await?;

    Ok(Json(RequestResetResponse { token, expires_at }))
}

/// Check a reset token without consuming it
///
/// # Errors
/// * `400 Bad Request` - token is unknown, expired or already used
pub async fn verify_reset(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<VerifyResetResponse>, ApiError> {
    let user_id = reset_tokens::validate(&state.pool, &token).await?;

    Ok(Json(VerifyResetResponse {
        valid: true,
        user_id: user_id.to_string(),
    }))
}

/// Apply a password reset
///
/// Token consumption and the password update are a single atomic unit; if
/// either half fails, neither persists.
///
/// # Errors
/// * `400 Bad Request` - token is unknown, expired or already used
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    reset_tokens::consume_and_apply(&state.pool, &request.token, &request.new_password).await?;

    Ok(Json(OkResponse::new()))
}
