//! Registry of wire codes carried in every response envelope.
//!
//! Each code maps to:
//! - the string sent to clients (e.g. `"NOT_FOUND"`)
//! - an integer used in structured logs
//! - a default human-readable message
//! - the HTTP status of the response
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//! use axum::http::StatusCode;
//!
//! let code = ErrorCode::NotFound;
//! assert_eq!(code.as_str(), "NOT_FOUND");
//! assert_eq!(code.http_status(), StatusCode::NOT_FOUND);
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The single success code
    Success,

    /// Client input failed validation or could not be parsed
    BadRequest,

    /// Path identifier is not a valid UUID
    InvalidUuid,

    /// A referenced entity does not exist
    NotFound,

    /// Storage or unexpected failure
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidUuid => "INVALID_UUID",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Integer code for logs: 0 success, 1xxx client errors, 5xxx server errors.
    pub fn code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::BadRequest => 1001,
            Self::InvalidUuid => 1002,
            Self::NotFound => 1004,
            Self::InternalError => 5000,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::BadRequest => "Bad request",
            Self::InvalidUuid => "Invalid UUID format",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::BadRequest | Self::InvalidUuid => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
