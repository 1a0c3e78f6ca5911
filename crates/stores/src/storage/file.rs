//! File-backed storage: one JSON document per collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{StorageBackend, StorageError};

/// Stores each collection as `<data_dir>/<collection>.json`.
///
/// Writes go through a temp file followed by a rename, so readers never
/// observe a partially written document even if the process dies mid-write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the collection files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read(&self, collection: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(self.document_path(collection)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, collection: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.document_path(collection);
        let tmp = self.dir.join(format!("{collection}.json.tmp"));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        Ok(())
    }

    async fn remove(&self, collection: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.document_path(collection)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_missing_collection() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        assert!(backend.read("products").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend
            .write("products", b"[1,2,3]".to_vec())
            .await
            .unwrap();
        let bytes = backend.read("products").await.unwrap().unwrap();
        assert_eq!(bytes, b"[1,2,3]");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.write("orders", b"[]".to_vec()).await.unwrap();
        backend.write("orders", b"[{}]".to_vec()).await.unwrap();

        let bytes = backend.read("orders").await.unwrap().unwrap();
        assert_eq!(bytes, b"[{}]");
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.write("token", b"{}".to_vec()).await.unwrap();
        backend.remove("token").await.unwrap();
        backend.remove("token").await.unwrap();

        assert!(backend.read("token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.write("cart", b"{}".to_vec()).await.unwrap();

        assert!(!dir.path().join("cart.json.tmp").exists());
        assert!(dir.path().join("cart.json").exists());
    }
}
