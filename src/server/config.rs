/**
 * Server Configuration
 *
 * Loads configuration from environment variables (with `.env` support via
 * the entry point) into a single `Config` struct, built once at startup.
 * Constructors downstream - the session key pair, the pool, the storage
 * handle - take their values from here rather than reading the environment
 * themselves.
 */

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default upload cap: 10 MiB
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL (e.g. `sqlite://xfgate.db`)
    pub database_url: String,
    /// Secret for signing session tokens
    pub jwt_secret: String,
    /// TCP port to listen on
    pub port: u16,
    /// Directory uploaded blobs are written to
    pub storage_dir: PathBuf,
    /// Maximum accepted upload body size in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Read configuration from the environment, with development defaults.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://xfgate.db".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using an insecure development default");
            "insecure-development-secret".to_string()
        });

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let storage_dir = std::env::var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            database_url,
            jwt_secret,
            port,
            storage_dir,
            max_upload_bytes,
        }
    }
}

/// Create the database pool and bring the schema up to date.
///
/// The database file is created if missing; foreign keys are enforced so a
/// user row can never be removed while reset tokens still reference it.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created");

    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {:?}", e);
        sqlx::Error::Migrate(Box::new(e))
    })?;

    tracing::info!("Database migrations applied");

    Ok(pool)
}
