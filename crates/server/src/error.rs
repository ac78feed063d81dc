//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("storage error: {0}")]
    Storage(#[from] tasklist_storage::StorageError),

    #[error("metadata error: {0}")]
    Metadata(#[from] tasklist_metadata::MetadataError),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal_error",
            Self::Storage(e) => match e {
                tasklist_storage::StorageError::NotFound(_) => "not_found",
                _ => "storage_error",
            },
            Self::Metadata(e) => match e {
                tasklist_metadata::MetadataError::NotFound(_) => "not_found",
                tasklist_metadata::MetadataError::AlreadyExists(_) => "conflict",
                tasklist_metadata::MetadataError::Constraint(_) => "conflict",
                _ => "metadata_error",
            },
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(e) => match e {
                tasklist_storage::StorageError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Metadata(e) => match e {
                tasklist_metadata::MetadataError::NotFound(_) => StatusCode::NOT_FOUND,
                tasklist_metadata::MetadataError::AlreadyExists(_) => StatusCode::CONFLICT,
                tasklist_metadata::MetadataError::Constraint(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Demote this error to a 400 when it would otherwise be a 409.
    ///
    /// Task creation reports a duplicate title as a bad request rather than
    /// a conflict, unlike every other uniqueness failure.
    pub fn conflict_as_bad_request(self) -> Self {
        if self.status_code() == StatusCode::CONFLICT {
            return Self::BadRequest(self.to_string());
        }
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
