//! JSON body extractor with [`ApiError`] rejections.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// Like [`axum::Json`], but rejections become [`ApiError`] so malformed
/// bodies get the same error shape as every other failure.
///
/// Missing or mistyped fields map to 422, syntax errors to 400, and a
/// missing JSON content type to 415.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
