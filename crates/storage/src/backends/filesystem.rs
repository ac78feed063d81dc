//! Local filesystem storage backend.

use crate::error::{StorageError, StorageResult};
use crate::traits::FileStore;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Stores files under a root directory on the local filesystem.
pub struct FilesystemBackend {
    root: PathBuf,
}

impl FilesystemBackend {
    /// Create a backend rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| StorageError::Config(format!("cannot create {}: {e}", root.display())))?;
        Ok(Self { root })
    }

    /// Resolve a key to a path under the root.
    ///
    /// Keys are relative paths with normal components only; anything that
    /// could escape the root is rejected.
    fn resolve(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }
        let rel = Path::new(key);
        for component in rel.components() {
            match component {
                Component::Normal(_) => {}
                _ => {
                    return Err(StorageError::InvalidKey(format!(
                        "key must be a plain relative path: {key}"
                    )));
                }
            }
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl FileStore for FilesystemBackend {
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write to a sibling temp file and rename so the final path only
        // ever holds a complete file.
        let tmp = path.with_extension(format!("tmp.{}", Uuid::new_v4()));
        let result: StorageResult<()> = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            tokio::io::AsyncWriteExt::write_all(&mut file, &data).await?;
            file.sync_all().await?;
            tokio::fs::rename(&tmp, &path).await?;
            Ok(())
        }
        .await;

        if result.is_err() {
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        result
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.resolve(key)?;
        match tokio::fs::metadata(&path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> (tempfile::TempDir, FilesystemBackend) {
        let temp = tempfile::tempdir().unwrap();
        let backend = FilesystemBackend::new(temp.path()).unwrap();
        (temp, backend)
    }

    #[tokio::test]
    async fn stores_file_under_key() {
        let (temp, backend) = backend();
        backend
            .put("profile/a.png", Bytes::from_static(b"png-bytes"))
            .await
            .unwrap();
        assert!(backend.exists("profile/a.png").await.unwrap());
        let data = std::fs::read(temp.path().join("profile/a.png")).unwrap();
        assert_eq!(data, b"png-bytes");
    }

    #[tokio::test]
    async fn put_replaces_existing_content() {
        let (temp, backend) = backend();
        backend
            .put("profile/a.png", Bytes::from_static(b"old"))
            .await
            .unwrap();
        backend
            .put("profile/a.png", Bytes::from_static(b"new"))
            .await
            .unwrap();
        let data = std::fs::read(temp.path().join("profile/a.png")).unwrap();
        assert_eq!(data, b"new");
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let (_temp, backend) = backend();
        backend
            .put("profile/a.png", Bytes::from_static(b"x"))
            .await
            .unwrap();
        backend.delete("profile/a.png").await.unwrap();
        assert!(!backend.exists("profile/a.png").await.unwrap());
        assert!(matches!(
            backend.delete("profile/a.png").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let (_temp, backend) = backend();
        for key in ["../victim", "/etc/passwd", "a/../../victim", ""] {
            assert!(matches!(
                backend.put(key, Bytes::from_static(b"x")).await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn put_leaves_no_temp_files() {
        let (temp, backend) = backend();
        backend
            .put("profile/a.png", Bytes::from_static(b"x"))
            .await
            .unwrap();
        let entries: Vec<_> = std::fs::read_dir(temp.path().join("profile"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("a.png")]);
    }
}
