/**
 * Account Lifecycle Coordination
 *
 * Multi-step, multi-store operations that need all-or-nothing semantics:
 *
 * - login: whitelist gate, then credential check, then session issue. The
 *   order matters - the whitelist rejection is an access-policy failure
 *   (`Forbidden`, with its own message) while a missing user or wrong
 *   password both collapse into one generic `Unauthorized`.
 * - account deletion: password confirmation, then reset-token cleanup and
 *   user-row deletion in a single transaction. If the user row turns out to
 *   be gone, the whole unit rolls back - including the token cleanup.
 * - password-reset request: existence check plus ledger issue. The token is
 *   returned to the caller in-band; that mirrors the original design and is
 *   deliberately not "fixed" here (see DESIGN.md).
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::{reset_tokens, sessions::SessionKeys, users};
use crate::error::ApiError;
use crate::whitelist::store as whitelist;

/// Authenticate a user and issue a session token.
///
/// # Errors
/// * `Forbidden` - email not on the whitelist (checked first, even for
///   registered users)
/// * `Unauthorized` - no such user, or password mismatch (indistinguishable)
pub async fn login(
    pool: &SqlitePool,
    keys: &SessionKeys,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    if !whitelist::is_whitelisted(pool, email).await? {
        tracing::warn!("Login rejected, email not whitelisted: {}", email);
        return Err(ApiError::forbidden("Email is not on the access whitelist"));
    }

    let user = users::get_user_by_email(pool, email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed, no such user: {}", email);
            ApiError::unauthorized("Invalid credentials")
        })?;

    if !users::verify_password(&user, password)? {
        tracing::warn!("Login failed, bad password for: {}", email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = keys
        .issue(user.id)
        .map_err(|e| ApiError::internal(format!("token signing failed: {e}")))?;

    tracing::info!("User logged in: {}", user.email);

    Ok(token)
}

/// Delete an account after password confirmation.
///
/// One atomic unit: all of the user's reset tokens are deleted, then the
/// user row. Zero rows affected on the user delete aborts the unit with
/// `NotFound` and rolls the token cleanup back too.
///
/// # Errors
/// * `NotFound` - no such user
/// * `Unauthorized` - confirming password does not match (nothing changes)
pub async fn delete_account(
    pool: &SqlitePool,
    user_id: Uuid,
    confirming_password: &str,
) -> Result<(), ApiError> {
    let user = users::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !users::verify_password(&user, confirming_password)? {
        tracing::warn!("Account deletion rejected, bad password for: {}", user.email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let mut tx = pool.begin().await?;

    // Tokens first, then the parent row; the foreign key requires this order.
    let tokens_removed = reset_tokens::delete_for_user(&mut *tx, user_id).await?;
    let rows = users::delete_user(&mut *tx, user_id).await?;
    if rows == 0 {
        // Dropping tx rolls the token cleanup back.
        return Err(ApiError::not_found("User not found"));
    }

    tx.commit().await?;

    tracing::info!(
        "Deleted account {} ({} reset tokens removed)",
        user.email,
        tokens_removed
    );

    Ok(())
}

/// Request a password reset for an email.
///
/// # Errors
/// `NotFound` if no user has this email.
pub async fn request_password_reset(
    pool: &SqlitePool,
    email: &str,
) -> Result<(String, DateTime<Utc>), ApiError> {
    let user = users::get_user_by_email(pool, email)
        .await?
        .ok_or_else(|| ApiError::not_found("No account with that email"))?;

    reset_tokens::issue(pool, user.id).await
}
