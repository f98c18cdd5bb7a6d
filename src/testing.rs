//! Unit-test fixtures.
//!
//! In-memory SQLite pool with the shipped migrations applied. A single
//! connection keeps the in-memory database alive and shared for the whole
//! test; writes serialize on it, which is exactly the backing-store
//! behavior the atomic units rely on.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("invalid in-memory connect string")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to create in-memory test pool");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations on test pool");

    pool
}

/// File-backed pool with the production connection options (WAL journal,
/// foreign keys, several connections). Races that a single shared
/// connection would serialize away actually contend here; the caller owns
/// the directory the database file lives in.
pub async fn file_pool(dir: &Path, max_connections: u32) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(dir.join("test.db"))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .expect("failed to create file-backed test pool");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations on test pool");

    pool
}
