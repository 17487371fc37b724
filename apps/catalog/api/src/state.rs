//! Application state management

use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state, built once in `main`
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}
