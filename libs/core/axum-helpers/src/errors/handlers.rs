use axum::response::{IntoResponse, Response};

use super::ErrorCode;
use crate::response::ApiResponse;

/// Router fallback: 404 envelope for unknown paths.
pub async fn not_found() -> Response {
    ApiResponse::error(ErrorCode::NotFound, "The requested resource was not found").into_response()
}
