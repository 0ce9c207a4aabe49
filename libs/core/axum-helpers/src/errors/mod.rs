pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Application error rendered as an [`ApiResponse`] envelope.
///
/// Domain errors convert into this type, and so do axum extractor rejections,
/// so malformed bodies and query strings get the same envelope as a failed
/// validation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("JSON extraction error: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Path extraction error: {0}")]
    PathRejection(#[from] PathRejection),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest(_)
            | AppError::JsonRejection(_)
            | AppError::QueryRejection(_)
            | AppError::PathRejection(_) => ErrorCode::BadRequest,
            AppError::InvalidUuid(_) => ErrorCode::InvalidUuid,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    fn into_message(self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => msg,
            AppError::InvalidUuid(raw) => format!("invalid id: {raw}"),
            AppError::JsonRejection(e) => e.body_text(),
            AppError::QueryRejection(e) => e.body_text(),
            AppError::PathRejection(e) => e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let message = self.into_message();

        if code == ErrorCode::InternalError {
            tracing::error!(error_code = code.code(), "Internal server error: {}", message);
        } else {
            tracing::info!(error_code = code.code(), error = %code, "{}", message);
        }

        ApiResponse::error(code, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_app_error_codes() {
        assert_eq!(AppError::BadRequest("x".into()).code(), ErrorCode::BadRequest);
        assert_eq!(AppError::NotFound("x".into()).code(), ErrorCode::NotFound);
        assert_eq!(
            AppError::InternalServerError("x".into()).code(),
            ErrorCode::InternalError
        );
        assert_eq!(AppError::InvalidUuid("x".into()).code(), ErrorCode::InvalidUuid);
    }

    #[test]
    fn test_not_found_renders_404() {
        let response = AppError::NotFound("product not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_error_renders_500() {
        let response = AppError::InternalServerError("pool timed out".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_uuid_message_names_the_input() {
        let err = AppError::InvalidUuid("abc".into());
        assert_eq!(err.into_message(), "invalid id: abc");
    }
}
