//! Database models mapping to the metadata schema.

use sqlx::FromRow;
use time::OffsetDateTime;

/// User record for single-user mode.
///
/// Created once at bootstrap; only the profile image path is mutated
/// afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub name: String,
    pub profile_image_path: Option<String>,
}

/// Task list record.
#[derive(Debug, Clone, FromRow)]
pub struct TaskListRow {
    pub task_list_id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Task record.
///
/// `task_list_id` is nullable to tolerate legacy rows, but creation always
/// requires a list. `status` holds the stable string form of
/// [`tasklist_core::TaskStatus`].
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub task_id: i64,
    pub user_id: i64,
    pub task_list_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Per-status task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
}

impl TaskCounts {
    /// Total tasks covered by these counts.
    pub fn total(&self) -> u64 {
        self.pending + self.in_progress + self.completed
    }
}
