//! Reusable OpenAPI responses for the error envelopes.

use crate::errors::ErrorCode;
#[allow(unused_imports)]
use serde_json::json;
use serde::Serialize;
use utoipa::{ToResponse, ToSchema};

/// Envelope without `data`, as returned by errors, updates and deletes.
#[derive(Serialize, ToSchema)]
pub struct EmptyEnvelope {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(ToResponse)]
#[response(
    description = "Success without payload",
    content_type = "application/json",
    example = json!({ "code": "SUCCESS", "message": "Success" })
)]
pub struct EmptySuccessResponse(pub EmptyEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({ "code": "BAD_REQUEST", "message": "missing name" })
)]
pub struct BadRequestResponse(pub EmptyEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Not Found",
    content_type = "application/json",
    example = json!({ "code": "NOT_FOUND", "message": "store not found" })
)]
pub struct NotFoundResponse(pub EmptyEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "code": "INTERNAL_ERROR", "message": "An internal server error occurred" })
)]
pub struct InternalServerErrorResponse(pub EmptyEnvelope);
