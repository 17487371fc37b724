//! Configuration for the Catalog API

use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, env_parse, server::ServerConfig};
use database::common::RetryConfig;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub database_retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub cors: CorsConfig,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?,
            database_retry: RetryConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            cors: CorsConfig::from_env()?,
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/catalog")),
                ("APP_ENV", None),
                ("PORT", None),
                ("RUN_MIGRATIONS", None),
                ("CORS_ALLOWED_ORIGIN", None),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.app.name, "catalog_api");
                assert_eq!(config.database.url(), "postgresql://localhost/catalog");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.environment, Environment::Development);
                assert!(!config.cors.is_configured());
                assert!(config.run_migrations);
            },
        );
    }

    #[test]
    fn test_config_from_env_custom() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://db/catalog")),
                ("APP_ENV", Some("production")),
                ("PORT", Some("9000")),
                ("RUN_MIGRATIONS", Some("false")),
                ("CORS_ALLOWED_ORIGIN", Some("https://admin.example.com")),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.server.port, 9000);
                assert!(config.environment.is_production());
                assert_eq!(config.cors.allowed_origins, vec!["https://admin.example.com"]);
                assert!(!config.run_migrations);
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_config_rejects_bad_run_migrations() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/catalog")),
                ("RUN_MIGRATIONS", Some("sometimes")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("RUN_MIGRATIONS"));
            },
        );
    }
}
