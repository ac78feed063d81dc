//! Server test utilities.

use std::sync::Arc;
use tasklist_core::AppConfig;
use tasklist_metadata::{MetadataStore, SqliteStore, TaskListRepo};
use tasklist_server::bootstrap::ensure_default_user;
use tasklist_server::{AppState, create_router};
use tasklist_storage::{FileStore, FilesystemBackend};
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with temporary storage, seeded like a fresh
    /// production start (default user plus default task list).
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let config = AppConfig::for_testing(temp_dir.path());

        let storage: Arc<dyn FileStore> = Arc::new(
            FilesystemBackend::new(temp_dir.path().join("uploads"))
                .expect("Failed to create storage backend"),
        );

        let metadata: Arc<dyn MetadataStore> = Arc::new(
            SqliteStore::new(temp_dir.path().join("tasklist.db"))
                .await
                .expect("Failed to create metadata store"),
        );

        let user_id = ensure_default_user(metadata.as_ref(), &config.user)
            .await
            .expect("Failed to seed default user");

        let state = AppState::new(config, storage, metadata, user_id);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying metadata store.
    pub fn metadata(&self) -> Arc<dyn MetadataStore> {
        self.state.metadata.clone()
    }

    /// The seeded user's id.
    pub fn user_id(&self) -> i64 {
        self.state.user_id
    }

    /// Path of the upload storage root.
    pub fn uploads_dir(&self) -> std::path::PathBuf {
        self._temp_dir.path().join("uploads")
    }

    /// Id of the seeded "My Tasks" list.
    pub async fn default_list_id(&self) -> i64 {
        self.state
            .metadata
            .get_task_list_by_name(self.state.user_id, "My Tasks")
            .await
            .expect("Failed to query default list")
            .expect("Default list missing")
            .task_list_id
    }
}
