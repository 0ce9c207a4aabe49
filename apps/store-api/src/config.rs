use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::{RetryConfig, postgres::PostgresConfig};

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Startup connect policy (`DB_CONNECT_ATTEMPTS`, `DB_RETRY_*_DELAY_MS`)
    pub db_retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let db_retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            db_retry,
            server,
            environment,
            run_migrations,
        })
    }
}
