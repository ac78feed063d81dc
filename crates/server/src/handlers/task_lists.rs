//! Task list handlers.

use crate::error::{ApiError, ApiResult};
use crate::extract::AppJson;
use crate::handlers::rfc3339;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tasklist_core::limits::MAX_LIST_NAME_LEN;
use tasklist_metadata::{TaskListRepo, TaskListRow};
use time::OffsetDateTime;

/// Task list representation in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskListResponse {
    fn from_row(row: &TaskListRow) -> Self {
        Self {
            id: row.task_list_id,
            name: row.name.clone(),
            created_at: rfc3339(row.created_at),
            updated_at: rfc3339(row.updated_at),
        }
    }
}

/// Request body for creating a task list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskListRequest {
    pub name: String,
}

/// Request body for renaming a task list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskListRequest {
    pub name: String,
}

fn validate_name(name: &str) -> ApiResult<&str> {
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    // Character count, not byte length; surrounding whitespace is kept.
    if name.chars().count() > MAX_LIST_NAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "name exceeds {MAX_LIST_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

/// Handle GET /api/tasklists.
pub async fn list_task_lists(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TaskListResponse>>> {
    let rows = state.metadata.list_task_lists(state.user_id).await?;
    Ok(Json(rows.iter().map(TaskListResponse::from_row).collect()))
}

/// Handle GET /api/tasklists/{task_list_id}.
pub async fn get_task_list(
    State(state): State<AppState>,
    Path(task_list_id): Path<i64>,
) -> ApiResult<Json<TaskListResponse>> {
    let row = state
        .metadata
        .get_task_list(state.user_id, task_list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task list {task_list_id} not found")))?;
    Ok(Json(TaskListResponse::from_row(&row)))
}

/// Handle POST /api/tasklists.
pub async fn create_task_list(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTaskListRequest>,
) -> ApiResult<(StatusCode, Json<TaskListResponse>)> {
    let name = validate_name(&req.name)?;

    // Early exit on an obvious duplicate; the unique index catches races.
    if state
        .metadata
        .get_task_list_by_name(state.user_id, name)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "a task list named '{name}' already exists"
        )));
    }

    let now = OffsetDateTime::now_utc();
    let row = state
        .metadata
        .create_task_list(state.user_id, name, now)
        .await?;

    tracing::info!(task_list_id = row.task_list_id, name = %row.name, "Created task list");
    Ok((StatusCode::CREATED, Json(TaskListResponse::from_row(&row))))
}

/// Handle PUT /api/tasklists/{task_list_id}.
pub async fn update_task_list(
    State(state): State<AppState>,
    Path(task_list_id): Path<i64>,
    AppJson(req): AppJson<UpdateTaskListRequest>,
) -> ApiResult<Json<TaskListResponse>> {
    let name = validate_name(&req.name)?;

    let existing = state
        .metadata
        .get_task_list(state.user_id, task_list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task list {task_list_id} not found")))?;

    if let Some(other) = state
        .metadata
        .get_task_list_by_name(state.user_id, name)
        .await?
        && other.task_list_id != task_list_id
    {
        return Err(ApiError::Conflict(format!(
            "a task list named '{name}' already exists"
        )));
    }

    let now = OffsetDateTime::now_utc();
    state
        .metadata
        .rename_task_list(state.user_id, task_list_id, name, now)
        .await?;

    Ok(Json(TaskListResponse::from_row(&TaskListRow {
        name: name.to_string(),
        updated_at: now,
        ..existing
    })))
}

/// Handle DELETE /api/tasklists/{task_list_id}.
///
/// Removes the list and every task it owns in one transaction.
pub async fn delete_task_list(
    State(state): State<AppState>,
    Path(task_list_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .metadata
        .delete_task_list(state.user_id, task_list_id)
        .await?;
    tracing::info!(task_list_id, "Deleted task list");
    Ok(StatusCode::NO_CONTENT)
}
