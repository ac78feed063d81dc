//! Metadata persistence for task lists, tasks, and the user record.
//!
//! The [`MetadataStore`] trait combines the repository traits with
//! migration and health checks. [`SqliteStore`] is the only backend.

pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use models::{TaskCounts, TaskListRow, TaskRow, UserRow};
pub use repos::{TaskFilter, TaskListRepo, TaskRepo, UserRepo};
pub use store::{MetadataStore, SqliteStore};

use std::sync::Arc;
use tasklist_core::MetadataConfig;

/// Build a metadata store from configuration.
pub async fn from_config(config: &MetadataConfig) -> MetadataResult<Arc<dyn MetadataStore>> {
    match config {
        MetadataConfig::Sqlite { path } => {
            tracing::info!(path = %path.display(), "Opening SQLite metadata store");
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_sqlite_store_from_config() {
        let temp = tempfile::tempdir().unwrap();
        let config = MetadataConfig::Sqlite {
            path: temp.path().join("meta.db"),
        };
        let store = from_config(&config).await.unwrap();
        store.health_check().await.unwrap();
    }
}
