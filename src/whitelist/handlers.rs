/**
 * Whitelist Handlers
 *
 * Whitelist management endpoints. All three sit behind the auth middleware -
 * only a logged-in caller may inspect or edit the access list.
 *
 * - POST   /api/whitelist         - add an email
 * - GET    /api/whitelist         - list emails, most-recently-added first
 * - DELETE /api/whitelist/{email} - remove an email
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;

use crate::auth::handlers::types::OkResponse;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;
use crate::whitelist::store::{self, WhitelistEntry};

/// Add-entry request
#[derive(Deserialize, Debug)]
pub struct AddWhitelistRequest {
    /// Email to permit
    pub email: String,
}

/// Validate email shape: `local@domain.tld`, no whitespace.
///
/// Intentionally RFC-lite - one `@`, a non-empty local part, and a domain
/// with a dot somewhere past its first character.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.splitn(2, '@');
    let local = match parts.next() {
        Some(l) if !l.is_empty() => l,
        _ => return false,
    };
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };

    // A second '@' would have landed in `domain`.
    if local.contains('@') || domain.contains('@') {
        return false;
    }

    match domain.find('.') {
        Some(0) => false,
        Some(_) if !domain.ends_with('.') => true,
        _ => false,
    }
}

/// Add an email to the whitelist
///
/// # Errors
///
/// * `400 Bad Request` - malformed email
/// * `409 Conflict` - email already whitelisted
pub async fn add_whitelist_entry(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<AddWhitelistRequest>,
) -> Result<Json<WhitelistEntry>, ApiError> {
    if !is_valid_email(&request.email) {
        tracing::warn!("Rejected malformed whitelist email: {:?}", request.email);
        return Err(ApiError::bad_request("Invalid email format"));
    }

    tracing::info!("{} adding {} to whitelist", caller.email, request.email);

    let entry = store::add_entry(&state.pool, &request.email).await?;

    Ok(Json(entry))
}

/// List whitelisted emails, most-recently-added first
pub async fn list_whitelist(
    AuthUser(_caller): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let entries = store::list_entries(&state.pool).await?;
    let emails = entries.into_iter().map(|e| e.email).collect();

    Ok(Json(emails))
}

/// Remove an email from the whitelist
///
/// # Errors
///
/// * `404 Not Found` - email is not on the whitelist
pub async fn remove_whitelist_entry(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let removed = store::remove_entry(&state.pool, &email).await?;
    if !removed {
        return Err(ApiError::not_found("Email is not on the whitelist"));
    }

    tracing::info!("{} removed {} from whitelist", caller.email, email);

    Ok(Json(OkResponse::new()))
}
