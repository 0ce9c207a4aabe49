/// Failures outside the request path: migrations at startup and the `/ready` probe.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("migration failed: {0}")]
    Migration(#[source] sea_orm::DbErr),

    #[error("health check failed: {0}")]
    HealthCheckFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
