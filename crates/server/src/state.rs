//! Application state shared across handlers.

use std::sync::Arc;
use tasklist_core::AppConfig;
use tasklist_metadata::MetadataStore;
use tasklist_storage::FileStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Upload file storage backend.
    pub storage: Arc<dyn FileStore>,
    /// Metadata store.
    pub metadata: Arc<dyn MetadataStore>,
    /// The resolved single-user id, determined at bootstrap.
    ///
    /// Handlers take the user id from here instead of assuming a fixed
    /// value; nothing below this layer hardcodes an identity.
    pub user_id: i64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn FileStore>,
        metadata: Arc<dyn MetadataStore>,
        user_id: i64,
    ) -> Self {
        Self {
            config: Arc::new(config),
            storage,
            metadata,
            user_id,
        }
    }
}
