/**
 * File Handlers
 *
 * - POST   /api/files/upload - multipart upload (auth required)
 * - GET    /api/files        - list records (no auth)
 * - DELETE /api/files/{id}   - delete record + blob (no auth)
 *
 * The auth asymmetry (upload gated, list/delete open) mirrors the original
 * design and is preserved deliberately - see DESIGN.md.
 *
 * Upload is two steps: write the blob, then register the record. If
 * registration loses the filename race, the just-written blob is removed
 * again so a 409 leaves nothing behind.
 */

use axum::{
    extract::{Multipart, Path, State},
    response::Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::files::registry::{self, FileRecord};
use crate::files::storage;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Upload response
#[derive(Serialize, Debug)]
pub struct UploadResponse {
    /// Id of the new file record
    pub id: String,
    /// Logical filename
    pub filename: String,
    /// Physical path of the stored blob
    pub path: String,
}

/// File listing entry
#[derive(Serialize, Debug)]
pub struct FileResponse {
    /// Id of the file record
    pub id: String,
    /// Logical filename
    pub filename: String,
    /// Physical path of the stored blob
    pub path: String,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id.to_string(),
            filename: record.filename,
            path: record.path,
        }
    }
}

/// Delete response, reporting both halves of the two-phase delete
#[derive(Serialize, Debug)]
pub struct DeleteFileResponse {
    /// Id of the record that was removed
    pub deleted_id: String,
    /// Whether the database record was removed
    pub record_deleted: bool,
    /// Whether the physical unlink succeeded
    pub physical_file_deleted: bool,
}

/// Map a multipart error to the API taxonomy.
///
/// A body that blows the configured limit surfaces as 413; everything else
/// about a broken multipart stream is a 400.
fn map_multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::bad_request(format!("Invalid upload: {err}"))
    }
}

/// Upload handler
///
/// Reads the first `file` field from the multipart body, writes the blob,
/// and registers the record.
///
/// # Errors
///
/// * `400 Bad Request` - no `file` field, or no usable filename
/// * `409 Conflict` - a file with this name already exists (the blob written
///   for this request is cleaned up again)
/// * `413 Payload Too Large` - body exceeded the configured limit
pub async fn upload_file(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .and_then(storage::sanitize_filename)
            .ok_or_else(|| ApiError::bad_request("Upload is missing a filename"))?;

        let data = field.bytes().await.map_err(map_multipart_error)?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) =
        upload.ok_or_else(|| ApiError::bad_request("No file field in upload"))?;

    tracing::info!(
        "{} uploading {} ({} bytes)",
        caller.email,
        filename,
        data.len()
    );

    let path = state.storage.save(&filename, &data).await?;
    let path_str = path.to_string_lossy().to_string();

    let record = match registry::register_file(&state.pool, &filename, &path_str).await {
        Ok(record) => record,
        Err(e) => {
            // Lost the registration (usually a duplicate filename); the blob
            // written above must not linger.
            storage::remove_blob(&path_str).await;
            return Err(e);
        }
    };

    Ok(Json(UploadResponse {
        id: record.id.to_string(),
        filename: record.filename,
        path: record.path,
    }))
}

/// List all registered files
pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let files = registry::list_files(&state.pool).await?;

    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

/// Delete a file by id
///
/// # Errors
///
/// * `404 Not Found` - no record with this id. A missing blob is NOT an
///   error; it is reported as `physical_file_deleted: false`.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteFileResponse>, ApiError> {
    let outcome = registry::delete_file(&state.pool, id).await?;

    Ok(Json(DeleteFileResponse {
        deleted_id: outcome.deleted_id.to_string(),
        record_deleted: outcome.record_deleted,
        physical_file_deleted: outcome.physical_delete_succeeded,
    }))
}
