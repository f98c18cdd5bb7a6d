/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in caller. It extracts the bearer
 * token from the Authorization header, verifies it against the session
 * keys, confirms the user still exists, and attaches the user to request
 * extensions for handlers.
 *
 * Every failure mode - missing header, malformed header, bad signature,
 * expired token, deleted user - answers 401 with the same message, so a
 * caller cannot tell which check failed.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::users;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user data extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies the token signature and expiry
/// 3. Confirms the user still exists in the database
/// 4. Attaches `AuthenticatedUser` to request extensions
///
/// Returns 401 Unauthorized if any step fails.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::unauthorized("Missing or invalid session token")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::unauthorized("Missing or invalid session token")
    })?;

    let user_id = state.session_keys.verify(token).map_err(|e| {
        tracing::warn!("Invalid session token: {:?}", e);
        ApiError::unauthorized("Missing or invalid session token")
    })?;

    // A token may outlive its account; deleted users do not authenticate.
    let user = users::get_user_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Session token for deleted user: {}", user_id);
            ApiError::unauthorized("Missing or invalid session token")
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user.
///
/// Handlers behind `auth_middleware` take this as a parameter to get the
/// caller that the middleware attached.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::unauthorized("Missing or invalid session token")
            })?;

        Ok(AuthUser(user))
    }
}
