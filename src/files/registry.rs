/**
 * File Registry
 *
 * The database half of a file's identity: logical filename -> physical path.
 * Filenames are unique (exact, case-sensitive match); duplicates are
 * rejected, never overwritten. The uniqueness check is the schema's UNIQUE
 * constraint, so two concurrent uploads of the same name get exactly one
 * success and one `Conflict`.
 *
 * Deletion is two-phase: the physical blob is unlinked first (best-effort),
 * then the row is removed unconditionally. A crash in between leaves an
 * orphaned blob at worst, never a record pointing at nothing. Both outcomes
 * are reported independently in `FileDeleteOutcome`.
 */

use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{is_unique_violation, ApiError};
use crate::files::storage;

/// File record row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FileRecord {
    /// Unique file ID
    pub id: Uuid,
    /// Logical filename (unique)
    pub filename: String,
    /// Physical path of the blob
    pub path: String,
}

/// Structured result of a file deletion.
#[derive(Debug, Clone, Serialize)]
pub struct FileDeleteOutcome {
    /// Id of the record that was removed
    pub deleted_id: Uuid,
    /// Whether the database record was removed
    pub record_deleted: bool,
    /// Whether a physical unlink was attempted
    pub physical_delete_attempted: bool,
    /// Whether the physical unlink succeeded
    pub physical_delete_succeeded: bool,
}

/// Register an uploaded file.
///
/// # Errors
/// `Conflict` if a record with this filename already exists.
pub async fn register_file(
    pool: &SqlitePool,
    filename: &str,
    path: &str,
) -> Result<FileRecord, ApiError> {
    let record = sqlx::query_as::<_, FileRecord>(
        r#"
        INSERT INTO files (id, filename, path)
        VALUES (?, ?, ?)
        RETURNING id, filename, path
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(filename)
    .bind(path)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("A file with that name already exists")
        } else {
            e.into()
        }
    })?;

    tracing::info!("Registered file {} at {}", record.filename, record.path);

    Ok(record)
}

/// List all file records.
pub async fn list_files(pool: &SqlitePool) -> Result<Vec<FileRecord>, sqlx::Error> {
    sqlx::query_as::<_, FileRecord>("SELECT id, filename, path FROM files ORDER BY filename")
        .fetch_all(pool)
        .await
}

/// Look up a single record by id.
pub async fn get_file(pool: &SqlitePool, id: Uuid) -> Result<Option<FileRecord>, sqlx::Error> {
    sqlx::query_as::<_, FileRecord>("SELECT id, filename, path FROM files WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a file: blob first, record second.
///
/// # Errors
/// `NotFound` if no record has this id, including when a concurrent delete
/// removed the row first - only the caller whose DELETE affected the row
/// reports `record_deleted: true`. A failed unlink is NOT an error - it
/// comes back as `physical_delete_succeeded: false`.
pub async fn delete_file(pool: &SqlitePool, id: Uuid) -> Result<FileDeleteOutcome, ApiError> {
    let record = get_file(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    let physical_delete_succeeded = storage::remove_blob(&record.path).await;

    let removed = sqlx::query("DELETE FROM files WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    if removed == 0 {
        // Lost a delete race; the winner reported the removal.
        return Err(ApiError::not_found("File not found"));
    }

    tracing::info!(
        "Deleted file record {} (blob removed: {})",
        record.filename,
        physical_delete_succeeded
    );

    Ok(FileDeleteOutcome {
        deleted_id: id,
        record_deleted: true,
        physical_delete_attempted: true,
        physical_delete_succeeded,
    })
}
