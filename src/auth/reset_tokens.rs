/**
 * Reset Token Ledger
 *
 * Single-use, time-limited password-reset tokens. Per-token state machine:
 * Issued -> {Consumed, Expired}, where Expired is derived from the clock
 * rather than stored. Rows are never deleted on use or expiry (they stay for
 * audit) - only account deletion removes them.
 *
 * Token material is 32 random bytes from the OS RNG, hex encoded, so a token
 * cannot be derived from the user id plus public information.
 *
 * Validation merges "not found", "expired" and "already used" into one
 * `InvalidOrExpired` failure to prevent enumeration.
 */

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::auth::users;
use crate::error::{is_foreign_key_violation, ApiError};

/// Reset token lifetime in minutes
pub const RESET_TOKEN_TTL_MINUTES: i64 = 15;

/// Reset token row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResetToken {
    /// Unique token ID
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Opaque token value presented by the caller
    pub token: String,
    /// Expiry instant; the token never validates at or past this point
    pub expires_at: DateTime<Utc>,
    /// Consumption flag; flips to true exactly once
    pub used: bool,
}

/// Generate opaque token material (32 random bytes, hex encoded).
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issue a reset token for a user.
///
/// # Errors
/// `NotFound` if the user id references no existing user. The schema's
/// foreign key makes that call on the INSERT itself, so there is no window
/// between an existence check and the write.
pub async fn issue(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<(String, DateTime<Utc>), ApiError> {
    let token = generate_token();
    let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

    sqlx::query(
        r#"
        INSERT INTO reset_tokens (id, user_id, token, expires_at, used)
        VALUES (?, ?, ?, ?, 0)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&token)
    .bind(expires_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            ApiError::not_found("User not found")
        } else {
            ApiError::from(e)
        }
    })?;

    tracing::info!("Issued reset token for user {}", user_id);

    Ok((token, expires_at))
}

/// Validate a token without consuming it.
///
/// Succeeds only if a row exists with this value, `used` is false and the
/// expiry is in the future.
///
/// # Returns
/// The owning user id, or `InvalidOrExpired` - never a more specific reason.
pub async fn validate(pool: &SqlitePool, token: &str) -> Result<Uuid, ApiError> {
    let row = fetch_by_token(pool, token).await?;

    match row {
        Some(t) if !t.used && t.expires_at > Utc::now() => Ok(t.user_id),
        _ => Err(ApiError::InvalidOrExpired),
    }
}

/// Consume a token and apply the password change it authorizes, as a single
/// atomic unit.
///
/// The transaction opens with the guarded UPDATE (`used = 0` -> `1`,
/// RETURNING the owner and expiry), so it begins as a writer: concurrent
/// consumers of one token serialize on the write lock and every loser sees
/// zero rows, never a lock error. The expiry check runs after the claim; an
/// expired token rolls back unburned. If any step fails the transaction
/// rolls back, so a token is never burned without the password changing (or
/// vice versa). Of any number of simultaneous consumers, exactly one commits
/// and the rest see `InvalidOrExpired`.
pub async fn consume_and_apply(
    pool: &SqlitePool,
    token: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    // Hash outside the transaction; bcrypt is deliberately slow.
    let new_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)?;

    let mut tx = pool.begin().await?;

    // Must stay the first statement in the transaction.
    let claimed: Option<(Uuid, DateTime<Utc>)> = sqlx::query_as(
        r#"
        UPDATE reset_tokens
        SET used = 1
        WHERE token = ? AND used = 0
        RETURNING user_id, expires_at
        "#,
    )
    .bind(token)
    .fetch_optional(&mut *tx)
    .await?;

    let (user_id, expires_at) = match claimed {
        Some(row) => row,
        // Unknown or already-used token, or a lost race.
        None => return Err(ApiError::InvalidOrExpired),
    };

    if expires_at <= Utc::now() {
        // Dropping tx rolls back; the expired token stays unburned.
        return Err(ApiError::InvalidOrExpired);
    }

    let updated = users::update_password(&mut *tx, user_id, &new_hash).await?;
    if updated == 0 {
        return Err(ApiError::InvalidOrExpired);
    }

    tx.commit().await?;

    tracing::info!("Password reset applied for user {}", user_id);

    Ok(())
}

/// Delete all reset tokens belonging to a user.
///
/// Runs inside the account-deletion transaction, before the user row goes
/// (the foreign key requires this order).
pub async fn delete_for_user<'e, E>(executor: E, user_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM reset_tokens WHERE user_id = ?")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Count a user's tokens (used by tests and account deletion checks).
pub async fn count_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM reset_tokens WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

async fn fetch_by_token(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<ResetToken>, sqlx::Error> {
    sqlx::query_as::<_, ResetToken>(
        r#"
        SELECT id, user_id, token, expires_at, used
        FROM reset_tokens
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}
