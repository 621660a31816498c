/// Request extractors
///
/// [`ApiJson`] is `axum::Json` with rejections turned into [`ApiError`], so a
/// malformed body gets the same `{error, message, details?}` shape as every
/// other failure.

use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
