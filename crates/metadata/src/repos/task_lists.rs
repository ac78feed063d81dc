//! Task list repository.

use crate::error::MetadataResult;
use crate::models::TaskListRow;
use async_trait::async_trait;
use time::OffsetDateTime;

/// Repository for task list operations.
///
/// Every operation is scoped to an explicit `user_id`; rows owned by other
/// users are invisible.
#[async_trait]
pub trait TaskListRepo: Send + Sync {
    /// List all task lists for a user, ordered by name ascending.
    async fn list_task_lists(&self, user_id: i64) -> MetadataResult<Vec<TaskListRow>>;

    /// Get a task list by id.
    async fn get_task_list(
        &self,
        user_id: i64,
        task_list_id: i64,
    ) -> MetadataResult<Option<TaskListRow>>;

    /// Get a task list by name.
    ///
    /// Used as the uniqueness pre-check; the `UNIQUE(user_id, name)` index
    /// remains the source of truth.
    async fn get_task_list_by_name(
        &self,
        user_id: i64,
        name: &str,
    ) -> MetadataResult<Option<TaskListRow>>;

    /// Insert a task list and return the stored row.
    ///
    /// Returns [`crate::MetadataError::Constraint`] when the name is already
    /// taken for this user.
    async fn create_task_list(
        &self,
        user_id: i64,
        name: &str,
        now: OffsetDateTime,
    ) -> MetadataResult<TaskListRow>;

    /// Rename a task list and bump `updated_at`.
    ///
    /// Returns [`crate::MetadataError::NotFound`] if the id does not resolve
    /// under this user, [`crate::MetadataError::Constraint`] on a name
    /// collision.
    async fn rename_task_list(
        &self,
        user_id: i64,
        task_list_id: i64,
        name: &str,
        now: OffsetDateTime,
    ) -> MetadataResult<()>;

    /// Delete a task list and all tasks it owns, atomically.
    ///
    /// Returns [`crate::MetadataError::NotFound`] if the id does not resolve
    /// under this user.
    async fn delete_task_list(&self, user_id: i64, task_list_id: i64) -> MetadataResult<()>;
}
