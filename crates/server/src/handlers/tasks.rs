//! Task handlers.

use crate::error::{ApiError, ApiResult};
use crate::extract::AppJson;
use crate::handlers::rfc3339;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tasklist_core::TaskStatus;
use tasklist_core::limits::{MAX_TASK_DESCRIPTION_LEN, MAX_TASK_TITLE_LEN};
use tasklist_metadata::{TaskCounts, TaskFilter, TaskListRepo, TaskRepo, TaskRow};
use time::OffsetDateTime;

/// Task representation in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub task_list_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskResponse {
    fn from_row(row: &TaskRow) -> Self {
        Self {
            id: row.task_id,
            task_list_id: row.task_list_id,
            title: row.title.clone(),
            description: row.description.clone(),
            // Stored statuses are written through TaskStatus; an unknown
            // value can only come from manual edits.
            status: TaskStatus::parse(&row.status).unwrap_or_default(),
            created_at: rfc3339(row.created_at),
            updated_at: rfc3339(row.updated_at),
        }
    }
}

/// Query parameters for task listing and counting.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub task_list_id: Option<i64>,
}

impl TaskQuery {
    fn filter(&self) -> TaskFilter {
        TaskFilter {
            task_list_id: self.task_list_id,
        }
    }
}

/// Request body for creating a task.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub task_list_id: Option<i64>,
}

/// Request body for updating a task.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// Request body for a status-only update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// Per-status counts response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCountsResponse {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
}

impl From<TaskCounts> for TaskCountsResponse {
    fn from(counts: TaskCounts) -> Self {
        Self {
            pending: counts.pending,
            in_progress: counts.in_progress,
            completed: counts.completed,
        }
    }
}

fn validate_title(title: &str) -> ApiResult<&str> {
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }
    // Character count, not byte length; surrounding whitespace is kept.
    if title.chars().count() > MAX_TASK_TITLE_LEN {
        return Err(ApiError::BadRequest(format!(
            "title exceeds {MAX_TASK_TITLE_LEN} characters"
        )));
    }
    Ok(title)
}

fn validate_description(description: Option<&str>) -> ApiResult<Option<&str>> {
    if let Some(desc) = description
        && desc.chars().count() > MAX_TASK_DESCRIPTION_LEN
    {
        return Err(ApiError::BadRequest(format!(
            "description exceeds {MAX_TASK_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(description)
}

/// Handle GET /api/tasks.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let rows = state
        .metadata
        .list_tasks(state.user_id, query.filter())
        .await?;
    Ok(Json(rows.iter().map(TaskResponse::from_row).collect()))
}

/// Handle GET /api/tasks/{task_id}.
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let row = state
        .metadata
        .get_task(state.user_id, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task {task_id} not found")))?;
    Ok(Json(TaskResponse::from_row(&row)))
}

/// Handle POST /api/tasks.
///
/// A duplicate title within the target list responds 400, not 409. Updates
/// report the same collision as a conflict; creation keeps the original
/// client contract.
pub async fn create_task(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let title = validate_title(&req.title)?;
    let description = validate_description(req.description.as_deref())?;
    let task_list_id = req
        .task_list_id
        .ok_or_else(|| ApiError::BadRequest("taskListId is required".to_string()))?;

    if state
        .metadata
        .get_task_list(state.user_id, task_list_id)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest(format!(
            "task list {task_list_id} does not exist"
        )));
    }

    if state
        .metadata
        .get_task_by_title(task_list_id, title)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest(format!(
            "a task titled '{title}' already exists in this list"
        )));
    }

    let status = req.status.unwrap_or_default();
    let now = OffsetDateTime::now_utc();
    let row = state
        .metadata
        .create_task(
            state.user_id,
            task_list_id,
            title,
            description,
            status.as_str(),
            now,
        )
        .await
        .map_err(|e| ApiError::from(e).conflict_as_bad_request())?;

    tracing::info!(task_id = row.task_id, task_list_id, "Created task");
    Ok((StatusCode::CREATED, Json(TaskResponse::from_row(&row))))
}

/// Handle PUT /api/tasks/{task_id}.
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    AppJson(req): AppJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let title = validate_title(&req.title)?;
    let description = validate_description(req.description.as_deref())?;

    let existing = state
        .metadata
        .get_task(state.user_id, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task {task_id} not found")))?;

    // Title uniqueness applies within the owning list, excluding this task.
    if let Some(list_id) = existing.task_list_id
        && title != existing.title
        && let Some(other) = state.metadata.get_task_by_title(list_id, title).await?
        && other.task_id != task_id
    {
        return Err(ApiError::Conflict(format!(
            "a task titled '{title}' already exists in this list"
        )));
    }

    let now = OffsetDateTime::now_utc();
    state
        .metadata
        .update_task(
            state.user_id,
            task_id,
            title,
            description,
            req.status.as_str(),
            now,
        )
        .await?;

    Ok(Json(TaskResponse::from_row(&TaskRow {
        title: title.to_string(),
        description: description.map(str::to_string),
        status: req.status.as_str().to_string(),
        updated_at: now,
        ..existing
    })))
}

/// Handle DELETE /api/tasks/{task_id}.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.metadata.delete_task(state.user_id, task_id).await?;
    tracing::info!(task_id, "Deleted task");
    Ok(StatusCode::NO_CONTENT)
}

/// Handle PATCH /api/tasks/{task_id}/status.
///
/// Idempotent; no transition restrictions apply.
pub async fn update_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    AppJson(req): AppJson<UpdateTaskStatusRequest>,
) -> ApiResult<StatusCode> {
    let now = OffsetDateTime::now_utc();
    state
        .metadata
        .update_task_status(state.user_id, task_id, req.status.as_str(), now)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle GET /api/tasks/counts.
pub async fn get_task_counts(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> ApiResult<Json<TaskCountsResponse>> {
    let counts = state
        .metadata
        .count_tasks(state.user_id, query.filter())
        .await?;
    Ok(Json(counts.into()))
}
