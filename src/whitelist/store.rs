/**
 * Whitelist Store
 *
 * The set of emails permitted to authenticate, independent of whether an
 * account exists. Membership is checked by exact match on every login -
 * removing an email locks out an already-registered user immediately.
 *
 * Uniqueness rests on the UNIQUE constraint; ids are autoincrement so
 * "most-recently-added first" is a plain ORDER BY.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{is_unique_violation, ApiError};

/// Whitelist entry row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WhitelistEntry {
    /// Row id (insertion order)
    pub id: i64,
    /// Whitelisted email (unique, exact-match)
    pub email: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Exact-match membership check.
pub async fn is_whitelisted(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM whitelist WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Add an email to the whitelist.
///
/// # Errors
/// `Conflict` if the email is already present.
pub async fn add_entry(pool: &SqlitePool, email: &str) -> Result<WhitelistEntry, ApiError> {
    let entry = sqlx::query_as::<_, WhitelistEntry>(
        r#"
        INSERT INTO whitelist (email, created_at)
        VALUES (?, ?)
        RETURNING id, email, created_at
        "#,
    )
    .bind(email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("Email is already whitelisted")
        } else {
            e.into()
        }
    })?;

    tracing::info!("Whitelisted email: {}", entry.email);

    Ok(entry)
}

/// Remove an email from the whitelist.
///
/// # Returns
/// `false` if the email was not present (callers map this to `NotFound`).
pub async fn remove_entry(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM whitelist WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List all entries, most-recently-added first.
pub async fn list_entries(pool: &SqlitePool) -> Result<Vec<WhitelistEntry>, sqlx::Error> {
    sqlx::query_as::<_, WhitelistEntry>(
        r#"
        SELECT id, email, created_at
        FROM whitelist
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}
