//! PostgreSQL connection plumbing for the store service.
//!
//! # Features
//!
//! - `postgres` (default): SeaORM connector, migrations runner, health check
//! - `config`: `core_config::FromEnv` for [`postgres::PostgresConfig`] and [`RetryConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::new(url), None).await?;
//! postgres::run_migrations::<Migrator>(&db, "store_api").await?;
//! postgres::check_health(&db).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
