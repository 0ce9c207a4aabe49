//! Uniform `{code, message, data}` envelope used for every response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::ErrorCode;

/// Response envelope.
///
/// ```json
/// { "code": "SUCCESS", "message": "Success", "data": { "id": "..." } }
/// ```
///
/// `data` is omitted when empty. The HTTP status travels with the value but is
/// never serialized.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> ApiResponse<T> {
    /// Success envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success,
            message: ErrorCode::Success.default_message().to_string(),
            data: Some(data),
            status: ErrorCode::Success.http_status(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl ApiResponse<()> {
    /// Success envelope with no `data`, used by updates and deletes.
    pub fn empty() -> Self {
        Self {
            code: ErrorCode::Success,
            message: ErrorCode::Success.default_message().to_string(),
            data: None,
            status: ErrorCode::Success.http_status(),
        }
    }

    /// Error envelope. An empty `message` falls back to the code's default.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            code.default_message().to_string()
        } else {
            message
        };

        Self {
            code,
            message,
            data: None,
            status: code.http_status(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
