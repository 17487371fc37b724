//! PostgreSQL connectivity for the catalog services.
//!
//! - [`postgres`]: pool configuration, connect with retry,
//!   migrations and a health ping, all over SeaORM
//! - [`common`]: the crate error type and a generic async retry helper
//!
//! The `config` feature adds `core_config::FromEnv` impls for
//! [`postgres::PostgresConfig`] and [`common::RetryConfig`].
//!
//! ```ignore
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
//!
//! let db = connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! run_migrations::<migration::Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
