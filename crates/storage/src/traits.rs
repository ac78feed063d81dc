//! File store trait.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Backend for uploaded files, addressed by relative keys like
/// `profile/<uuid>.png`.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store a file under the given key, replacing any existing file.
    ///
    /// The file becomes visible atomically; readers never observe a
    /// partially written file.
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Delete the file stored under the given key.
    ///
    /// Returns [`crate::StorageError::NotFound`] when no file exists.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether a file exists under the given key.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
