//! Startup seeding for single-user mode.

use crate::error::ApiResult;
use tasklist_core::UserConfig;
use tasklist_metadata::{MetadataError, MetadataStore, TaskListRepo, UserRepo};
use time::OffsetDateTime;

/// Ensure the single user and their default task list exist.
///
/// Runs at startup. When the database is empty, creates the configured user
/// and seeds their default list; otherwise resolves the existing user.
/// Returns the user id to thread through the application.
pub async fn ensure_default_user(
    metadata: &dyn MetadataStore,
    user: &UserConfig,
) -> ApiResult<i64> {
    if let Some(existing) = metadata.first_user().await? {
        tracing::debug!(user_id = existing.user_id, "Resolved existing user");
        return Ok(existing.user_id);
    }

    let user_id = metadata.create_user(&user.name).await?;
    tracing::info!(user_id, name = %user.name, "Seeded user");

    let now = OffsetDateTime::now_utc();
    match metadata
        .create_task_list(user_id, &user.default_list, now)
        .await
    {
        Ok(list) => {
            tracing::info!(task_list_id = list.task_list_id, name = %list.name, "Seeded default task list");
        }
        // A concurrent start may have seeded the list already.
        Err(MetadataError::Constraint(_)) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(user_id)
}
