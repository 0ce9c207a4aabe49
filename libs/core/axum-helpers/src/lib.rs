//! # Axum Helpers
//!
//! Shared HTTP plumbing for the store service.
//!
//! ## Modules
//!
//! - **[`response`]**: the `{code, message, data}` envelope
//! - **[`errors`]**: error code registry and [`AppError`]
//! - **[`extractors`]**: UUID path extractor
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly, health checks, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use errors::{AppError, ErrorCode};
pub use extractors::UuidPath;
pub use response::ApiResponse;
pub use server::{
    create_production_app, create_router, health_router, run_health_checks, HealthCheckFuture,
    ShutdownCoordinator,
};
