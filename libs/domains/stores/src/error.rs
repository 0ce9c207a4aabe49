use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn store_not_found() -> Self {
        StoreError::NotFound("store not found".to_string())
    }

    pub fn product_not_found() -> Self {
        StoreError::NotFound("product not found".to_string())
    }
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        StoreError::Internal(err.to_string())
    }
}

/// Convert StoreError to AppError for standardized error responses
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BadRequest(msg) => AppError::BadRequest(msg),
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_per_kind() {
        let cases = [
            (StoreError::BadRequest("missing name".into()), StatusCode::BAD_REQUEST),
            (StoreError::store_not_found(), StatusCode::NOT_FOUND),
            (StoreError::Internal("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_db_error_is_internal_with_driver_message() {
        let err: StoreError = sea_orm::DbErr::Custom("relation does not exist".into()).into();
        match err {
            StoreError::Internal(msg) => assert!(msg.contains("relation does not exist")),
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
