//! Task repository.

use crate::error::MetadataResult;
use crate::models::{TaskCounts, TaskRow};
use async_trait::async_trait;
use time::OffsetDateTime;

/// Listing filter for task queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    /// Restrict to a single task list when set.
    pub task_list_id: Option<i64>,
}

/// Repository for task operations, scoped to an explicit `user_id`.
#[async_trait]
pub trait TaskRepo: Send + Sync {
    /// List tasks for a user, ordered by creation time descending.
    async fn list_tasks(&self, user_id: i64, filter: TaskFilter) -> MetadataResult<Vec<TaskRow>>;

    /// Get a task by id.
    async fn get_task(&self, user_id: i64, task_id: i64) -> MetadataResult<Option<TaskRow>>;

    /// Find a task by title within a list.
    ///
    /// Uniqueness pre-check; the partial unique index on
    /// `(task_list_id, title)` remains the source of truth.
    async fn get_task_by_title(
        &self,
        task_list_id: i64,
        title: &str,
    ) -> MetadataResult<Option<TaskRow>>;

    /// Insert a task and return the stored row.
    ///
    /// Returns [`crate::MetadataError::Constraint`] when the title is already
    /// taken within the target list.
    async fn create_task(
        &self,
        user_id: i64,
        task_list_id: i64,
        title: &str,
        description: Option<&str>,
        status: &str,
        now: OffsetDateTime,
    ) -> MetadataResult<TaskRow>;

    /// Update title, description, status, and `updated_at`.
    ///
    /// Returns [`crate::MetadataError::NotFound`] if the id does not resolve
    /// under this user, [`crate::MetadataError::Constraint`] on a title
    /// collision within the task's list.
    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        title: &str,
        description: Option<&str>,
        status: &str,
        now: OffsetDateTime,
    ) -> MetadataResult<()>;

    /// Delete a task.
    ///
    /// Returns [`crate::MetadataError::NotFound`] if the id does not resolve
    /// under this user.
    async fn delete_task(&self, user_id: i64, task_id: i64) -> MetadataResult<()>;

    /// Set the status and bump `updated_at`. No uniqueness re-check; status
    /// is not part of the uniqueness key.
    async fn update_task_status(
        &self,
        user_id: i64,
        task_id: i64,
        status: &str,
        now: OffsetDateTime,
    ) -> MetadataResult<()>;

    /// Count tasks grouped by status.
    async fn count_tasks(&self, user_id: i64, filter: TaskFilter) -> MetadataResult<TaskCounts>;
}
