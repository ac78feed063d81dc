//! JSON extractor with API-shaped rejections.

use crate::error::ApiError;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

/// `axum::Json` with rejections rendered as [`ApiError::BadRequest`].
///
/// A malformed body is a validation failure and responds 400 with the
/// standard error envelope rather than axum's default 422 rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
