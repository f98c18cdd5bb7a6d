/**
 * User Model and Database Operations
 *
 * This module owns user identity: the `users` row (email + salted bcrypt
 * hash) and the operations that create, look up, re-key and delete it.
 *
 * Uniqueness of `email` is enforced by the UNIQUE constraint in the schema,
 * not by a prior read; `create_user` surfaces the raw sqlx error so callers
 * can map a unique violation to `Conflict`.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address (unique, case-sensitive as stored)
    pub email: String,
    /// Hashed password (bcrypt). Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - User email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user, or the raw sqlx error. A unique violation on `email` is
/// the caller's signal for `Conflict`.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, created_at, updated_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Verify a candidate password against the stored hash.
///
/// bcrypt performs the comparison; the hash is never logged or returned.
pub fn verify_password(user: &User, candidate: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(candidate, &user.password_hash)
}

/// Replace a user's password hash.
///
/// Takes any executor so it can run inside the same transaction that
/// consumes a reset token (see `auth::reset_tokens::consume_and_apply`).
///
/// # Returns
/// Number of rows affected (0 means the user no longer exists).
pub async fn update_password<'e, E>(
    executor: E,
    user_id: Uuid,
    new_hash: &str,
) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(new_hash)
    .bind(now)
    .bind(user_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a user row.
///
/// Must only run after the user's reset tokens have been removed (the
/// schema's foreign key enforces this). Takes any executor so account
/// deletion can group both deletes into one transaction.
///
/// # Returns
/// Number of rows affected (0 means the user was already gone).
pub async fn delete_user<'e, E>(executor: E, user_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
