//! # Axum Helpers
//!
//! Shared plumbing for the catalog HTTP services.
//!
//! - **[`server`]**: router assembly, health/index endpoints, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: [`AppError`] and the JSON error body with error codes
//! - **[`extractors`]**: [`ValidatedJson`] and [`IdPath`]
//! - **[`audit`]**: audit log events for data modifications
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{cors_layer, create_production_app, create_router, health_router};
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let cors = cors_layer(&CorsConfig::from_env()?, &Environment::from_env())?;
//! let router = create_router::<ApiDoc>(Router::new(), cors).merge(health_router());
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, index_router, run_health_checks,
    shutdown_signal,
};

pub use http::{cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
