//! Storage backends for uploaded profile images.

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::FilesystemBackend;
pub use error::{StorageError, StorageResult};
pub use traits::FileStore;

use std::sync::Arc;
use tasklist_core::StorageConfig;

/// Build a file store from configuration.
pub fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn FileStore>> {
    match config {
        StorageConfig::Filesystem { path } => {
            tracing::info!(path = %path.display(), "Using filesystem storage");
            Ok(Arc::new(FilesystemBackend::new(path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_filesystem_backend_from_config() {
        let temp = tempfile::tempdir().unwrap();
        let config = StorageConfig::Filesystem {
            path: temp.path().join("uploads"),
        };
        from_config(&config).unwrap();
        assert!(temp.path().join("uploads").is_dir());
    }
}
