//! Server infrastructure: router assembly, health and index endpoints,
//! graceful shutdown and connection cleanup.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(routes.merge(health_router()), cors);
//! create_production_app(router, &config.server, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use cleanup::close_postgres;
pub use health::{
    HealthCheckFuture, HealthResponse, health_handler, health_router, index_router,
    run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
