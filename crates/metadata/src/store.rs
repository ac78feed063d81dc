//! Metadata store trait and the SQLite implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::repos::{TaskListRepo, TaskRepo, UserRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined metadata store trait.
#[async_trait]
pub trait MetadataStore: UserRepo + TaskListRepo + TaskRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> MetadataResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;
}

/// Database schema.
///
/// Uniqueness is enforced by the indexes below; repository pre-checks are
/// only an early exit. Cascade behavior is declared on the foreign keys and
/// additionally executed as an explicit transaction in `delete_task_list`.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    profile_image_path TEXT
);

CREATE TABLE IF NOT EXISTS task_lists (
    task_list_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (user_id, name)
);

CREATE TABLE IF NOT EXISTS tasks (
    task_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    task_list_id INTEGER REFERENCES task_lists(task_list_id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_tasks_list_title
    ON tasks(task_list_id, title)
    WHERE task_list_id IS NOT NULL;

CREATE INDEX IF NOT EXISTS idx_tasks_user_created
    ON tasks(user_id, created_at);
"#;

/// SQLite-based metadata store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Create a new SQLite store and run migrations.
    pub async fn new(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            // Cascades and the task_lists FK depend on this pragma.
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        // A single connection sidesteps "database is locked" errors; SQLite
        // allows one writer anyway.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn migrate(&self) -> MetadataResult<()> {
        // raw_sql runs the whole multi-statement script.
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Implement the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::{TaskCounts, TaskListRow, TaskRow, UserRow};
    use crate::repos::TaskFilter;
    use time::OffsetDateTime;

    #[async_trait]
    impl UserRepo for SqliteStore {
        async fn create_user(&self, name: &str) -> MetadataResult<i64> {
            let result = sqlx::query("INSERT INTO users (name) VALUES (?)")
                .bind(name)
                .execute(&self.pool)
                .await?;
            Ok(result.last_insert_rowid())
        }

        async fn get_user(&self, user_id: i64) -> MetadataResult<Option<UserRow>> {
            let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn first_user(&self) -> MetadataResult<Option<UserRow>> {
            let row =
                sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY user_id LIMIT 1")
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(row)
        }

        async fn set_profile_image_path(
            &self,
            user_id: i64,
            path: Option<&str>,
        ) -> MetadataResult<()> {
            let result = sqlx::query("UPDATE users SET profile_image_path = ? WHERE user_id = ?")
                .bind(path)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "user_id {user_id} not found"
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TaskListRepo for SqliteStore {
        async fn list_task_lists(&self, user_id: i64) -> MetadataResult<Vec<TaskListRow>> {
            let rows = sqlx::query_as::<_, TaskListRow>(
                "SELECT * FROM task_lists WHERE user_id = ? ORDER BY name",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn get_task_list(
            &self,
            user_id: i64,
            task_list_id: i64,
        ) -> MetadataResult<Option<TaskListRow>> {
            let row = sqlx::query_as::<_, TaskListRow>(
                "SELECT * FROM task_lists WHERE task_list_id = ? AND user_id = ?",
            )
            .bind(task_list_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_task_list_by_name(
            &self,
            user_id: i64,
            name: &str,
        ) -> MetadataResult<Option<TaskListRow>> {
            let row = sqlx::query_as::<_, TaskListRow>(
                "SELECT * FROM task_lists WHERE user_id = ? AND name = ?",
            )
            .bind(user_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn create_task_list(
            &self,
            user_id: i64,
            name: &str,
            now: OffsetDateTime,
        ) -> MetadataResult<TaskListRow> {
            let result = sqlx::query(
                "INSERT INTO task_lists (user_id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
            )
            .bind(user_id)
            .bind(name)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| MetadataError::from_write(e, "task list name"))?;

            Ok(TaskListRow {
                task_list_id: result.last_insert_rowid(),
                user_id,
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            })
        }

        async fn rename_task_list(
            &self,
            user_id: i64,
            task_list_id: i64,
            name: &str,
            now: OffsetDateTime,
        ) -> MetadataResult<()> {
            let result = sqlx::query(
                "UPDATE task_lists SET name = ?, updated_at = ? WHERE task_list_id = ? AND user_id = ?",
            )
            .bind(name)
            .bind(now)
            .bind(task_list_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| MetadataError::from_write(e, "task list name"))?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "task_list_id {task_list_id} not found"
                )));
            }
            Ok(())
        }

        async fn delete_task_list(
            &self,
            user_id: i64,
            task_list_id: i64,
        ) -> MetadataResult<()> {
            // Delete owned tasks and the list in one transaction so no
            // orphaned tasks can remain referencing a deleted list.
            let mut tx = self.pool.begin().await?;

            sqlx::query("DELETE FROM tasks WHERE task_list_id = ? AND user_id = ?")
                .bind(task_list_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            let result = sqlx::query(
                "DELETE FROM task_lists WHERE task_list_id = ? AND user_id = ?",
            )
            .bind(task_list_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back the task deletion.
                return Err(MetadataError::NotFound(format!(
                    "task_list_id {task_list_id} not found"
                )));
            }

            tx.commit().await?;
            Ok(())
        }
    }

    #[async_trait]
    impl TaskRepo for SqliteStore {
        async fn list_tasks(
            &self,
            user_id: i64,
            filter: TaskFilter,
        ) -> MetadataResult<Vec<TaskRow>> {
            let rows = match filter.task_list_id {
                Some(list_id) => {
                    sqlx::query_as::<_, TaskRow>(
                        "SELECT * FROM tasks WHERE user_id = ? AND task_list_id = ? ORDER BY created_at DESC, task_id DESC",
                    )
                    .bind(user_id)
                    .bind(list_id)
                    .fetch_all(&self.pool)
                    .await?
                }
                None => {
                    sqlx::query_as::<_, TaskRow>(
                        "SELECT * FROM tasks WHERE user_id = ? ORDER BY created_at DESC, task_id DESC",
                    )
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await?
                }
            };
            Ok(rows)
        }

        async fn get_task(&self, user_id: i64, task_id: i64) -> MetadataResult<Option<TaskRow>> {
            let row = sqlx::query_as::<_, TaskRow>(
                "SELECT * FROM tasks WHERE task_id = ? AND user_id = ?",
            )
            .bind(task_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn get_task_by_title(
            &self,
            task_list_id: i64,
            title: &str,
        ) -> MetadataResult<Option<TaskRow>> {
            let row = sqlx::query_as::<_, TaskRow>(
                "SELECT * FROM tasks WHERE task_list_id = ? AND title = ?",
            )
            .bind(task_list_id)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn create_task(
            &self,
            user_id: i64,
            task_list_id: i64,
            title: &str,
            description: Option<&str>,
            status: &str,
            now: OffsetDateTime,
        ) -> MetadataResult<TaskRow> {
            let result = sqlx::query(
                r#"
                INSERT INTO tasks (user_id, task_list_id, title, description, status, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(user_id)
            .bind(task_list_id)
            .bind(title)
            .bind(description)
            .bind(status)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| MetadataError::from_write(e, "task title"))?;

            Ok(TaskRow {
                task_id: result.last_insert_rowid(),
                user_id,
                task_list_id: Some(task_list_id),
                title: title.to_string(),
                description: description.map(str::to_string),
                status: status.to_string(),
                created_at: now,
                updated_at: now,
            })
        }

        async fn update_task(
            &self,
            user_id: i64,
            task_id: i64,
            title: &str,
            description: Option<&str>,
            status: &str,
            now: OffsetDateTime,
        ) -> MetadataResult<()> {
            let result = sqlx::query(
                r#"
                UPDATE tasks SET title = ?, description = ?, status = ?, updated_at = ?
                WHERE task_id = ? AND user_id = ?
                "#,
            )
            .bind(title)
            .bind(description)
            .bind(status)
            .bind(now)
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| MetadataError::from_write(e, "task title"))?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "task_id {task_id} not found"
                )));
            }
            Ok(())
        }

        async fn delete_task(&self, user_id: i64, task_id: i64) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM tasks WHERE task_id = ? AND user_id = ?")
                .bind(task_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "task_id {task_id} not found"
                )));
            }
            Ok(())
        }

        async fn update_task_status(
            &self,
            user_id: i64,
            task_id: i64,
            status: &str,
            now: OffsetDateTime,
        ) -> MetadataResult<()> {
            let result = sqlx::query(
                "UPDATE tasks SET status = ?, updated_at = ? WHERE task_id = ? AND user_id = ?",
            )
            .bind(status)
            .bind(now)
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "task_id {task_id} not found"
                )));
            }
            Ok(())
        }

        async fn count_tasks(
            &self,
            user_id: i64,
            filter: TaskFilter,
        ) -> MetadataResult<TaskCounts> {
            let rows: Vec<(String, i64)> = match filter.task_list_id {
                Some(list_id) => {
                    sqlx::query_as(
                        "SELECT status, COUNT(*) FROM tasks WHERE user_id = ? AND task_list_id = ? GROUP BY status",
                    )
                    .bind(user_id)
                    .bind(list_id)
                    .fetch_all(&self.pool)
                    .await?
                }
                None => {
                    sqlx::query_as(
                        "SELECT status, COUNT(*) FROM tasks WHERE user_id = ? GROUP BY status",
                    )
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await?
                }
            };

            let mut counts = TaskCounts::default();
            for (status, count) in rows {
                match status.as_str() {
                    "Pending" => counts.pending = count as u64,
                    "InProgress" => counts.in_progress = count as u64,
                    "Completed" => counts.completed = count as u64,
                    other => {
                        tracing::warn!(status = %other, "Ignoring task with unknown stored status");
                    }
                }
            }
            Ok(counts)
        }
    }
}
