/**
 * Physical Blob Store
 *
 * Writes uploaded bytes under the configured storage directory and removes
 * them best-effort on delete. A blob is half of a file's identity - the
 * `files` row is the authoritative half, and the two can legitimately
 * disagree (a blob may go missing without the record failing).
 */

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Handle to the storage directory, shared through `AppState`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Persist uploaded bytes.
    ///
    /// The physical name is uuid-prefixed so two logical filenames can never
    /// collide on disk, whatever the registry decides about them.
    ///
    /// # Returns
    /// The path the blob was written to.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let physical = format!("{}_{}", Uuid::new_v4(), filename);
        let path = self.root.join(physical);

        tokio::fs::write(&path, bytes).await?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Ok(path)
    }
}

/// Best-effort physical unlink.
///
/// Failure is reported, never raised: the caller folds the boolean into its
/// structured outcome and carries on.
pub async fn remove_blob(path: &str) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to remove blob {}: {}", path, e);
            false
        }
    }
}

/// Reduce an uploaded filename to its final path component.
///
/// Strips any directory parts a client might smuggle in so blobs always land
/// directly under the storage root.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())?
        .to_string();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        storage.ensure_root().await.unwrap();

        let path = storage.save("notes.txt", b"hello").await.unwrap();
        assert!(path.exists());
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"hello");

        assert!(remove_blob(path.to_str().unwrap()).await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_remove_missing_blob_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-written.bin");

        assert!(!remove_blob(path.to_str().unwrap()).await);
    }

    #[tokio::test]
    async fn test_same_filename_gets_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        storage.ensure_root().await.unwrap();

        let a = storage.save("dup.txt", b"a").await.unwrap();
        let b = storage.save("dup.txt", b"b").await.unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("notes.txt").as_deref(), Some("notes.txt"));
        assert_eq!(
            sanitize_filename("../../etc/passwd").as_deref(),
            Some("passwd")
        );
        assert_eq!(sanitize_filename("dir/inner.bin").as_deref(), Some("inner.bin"));
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename(".."), None);
    }
}
