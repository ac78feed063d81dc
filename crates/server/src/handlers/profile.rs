//! Profile image handlers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;
use serde::Serialize;
use tasklist_core::limits::{ALLOWED_IMAGE_EXTENSIONS, MAX_IMAGE_SIZE};
use tasklist_metadata::UserRepo;
use tasklist_storage::FileStore;
use uuid::Uuid;

/// Profile image path response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageResponse {
    pub image_path: String,
}

/// Extract the lowercased extension, dot included.
fn file_extension(filename: &str) -> Option<String> {
    filename
        .rfind('.')
        .map(|idx| filename[idx..].to_ascii_lowercase())
}

async fn read_image_field(multipart: &mut Multipart) -> ApiResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .ok_or_else(|| ApiError::BadRequest("file has no filename".to_string()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read file: {e}")))?;
        return Ok((filename, data));
    }
    Err(ApiError::BadRequest("file is required".to_string()))
}

/// Handle POST /api/profile/image.
///
/// Replaces the stored profile image. The old file is removed best-effort;
/// the new file is published atomically under a fresh UUID key so a reread
/// never sees partial content.
pub async fn upload_profile_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ProfileImageResponse>> {
    let (filename, data) = read_image_field(&mut multipart).await?;

    if data.is_empty() {
        return Err(ApiError::BadRequest("file is empty".to_string()));
    }
    if data.len() > MAX_IMAGE_SIZE {
        return Err(ApiError::BadRequest(format!(
            "file exceeds the maximum size of {MAX_IMAGE_SIZE} bytes"
        )));
    }

    let extension = file_extension(&filename)
        .filter(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "file type not allowed; accepted extensions: {}",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            ))
        })?;

    let user = state
        .metadata
        .get_user(state.user_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("user not found".to_string()))?;

    // Remove the previous file first; a leftover file is tolerable, a
    // dangling stored path is not.
    if let Some(old_path) = user.profile_image_path.as_deref()
        && let Err(e) = state.storage.delete(old_path).await
    {
        tracing::warn!(path = old_path, error = %e, "Failed to remove previous profile image");
    }

    let key = format!("profile/{}{extension}", Uuid::new_v4());
    state.storage.put(&key, data).await?;
    state
        .metadata
        .set_profile_image_path(state.user_id, Some(&key))
        .await?;

    tracing::info!(path = %key, "Stored profile image");
    Ok(Json(ProfileImageResponse { image_path: key }))
}

/// Handle GET /api/profile/image.
pub async fn get_profile_image(
    State(state): State<AppState>,
) -> ApiResult<Json<ProfileImageResponse>> {
    let user = state
        .metadata
        .get_user(state.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("no profile image".to_string()))?;

    let image_path = user
        .profile_image_path
        .ok_or_else(|| ApiError::NotFound("no profile image".to_string()))?;
    Ok(Json(ProfileImageResponse { image_path }))
}

/// Handle DELETE /api/profile/image.
///
/// Clears the stored path; file removal is best-effort and a missing file
/// does not fail the request.
pub async fn delete_profile_image(State(state): State<AppState>) -> ApiResult<StatusCode> {
    let user = state
        .metadata
        .get_user(state.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("no profile image".to_string()))?;

    let image_path = user
        .profile_image_path
        .ok_or_else(|| ApiError::NotFound("no profile image".to_string()))?;

    if let Err(e) = state.storage.delete(&image_path).await {
        tracing::warn!(path = %image_path, error = %e, "Failed to remove profile image file");
    }
    state
        .metadata
        .set_profile_image_path(state.user_id, None)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_lowercased_extension() {
        assert_eq!(file_extension("photo.PNG").as_deref(), Some(".png"));
        assert_eq!(file_extension("a.b.jpeg").as_deref(), Some(".jpeg"));
        assert_eq!(file_extension("noext"), None);
    }
}
