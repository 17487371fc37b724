//! API routes module

pub mod health;
pub mod products;

use axum::{Router, routing::get};
use axum_helpers::server::{health_router, index_router};

use crate::state::AppState;

/// Title of the HTML landing page
pub const INDEX_TITLE: &str = "Product Catalog Administration";

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .merge(index_router(INDEX_TITLE, state.config.app))
        .merge(health_router())
        .merge(
            Router::new()
                .route("/ready", get(health::ready_handler))
                .with_state(state.clone()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
    use database::common::RetryConfig;
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
    use serde_json::{Value, json};
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn state(db: DatabaseConnection) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgresql://localhost/catalog"),
                database_retry: RetryConfig::default(),
                server: ServerConfig::default(),
                environment: Environment::Development,
                cors: CorsConfig::default(),
                run_migrations: false,
            },
            db,
        }
    }

    fn mock_db() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
    }

    async fn body_bytes(body: Body) -> Vec<u8> {
        body.collect().await.unwrap().to_bytes().to_vec()
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, body_bytes(response.into_body()).await)
    }

    #[tokio::test]
    async fn test_index_page_has_title() {
        let app = routes(&state(mock_db().into_connection()));

        let (status, body) = send(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Product Catalog Administration"));
        assert!(html.contains("catalog_api"));
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let app = routes(&state(mock_db().into_connection()));

        let (status, body) = send(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({"message": "OK"}));
    }

    #[tokio::test]
    async fn test_ready_when_database_answers() {
        let row = BTreeMap::from([("?column?".to_string(), sea_orm::Value::Int(Some(1)))]);
        let db = mock_db().append_query_results([vec![row]]).into_connection();
        let app = routes(&state(db));

        let (status, body) = send(app, "/ready").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({"status": "ready", "database": "connected"}));
    }

    #[tokio::test]
    async fn test_not_ready_when_database_fails() {
        let db = mock_db()
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();
        let app = routes(&state(db));

        let (status, body) = send(app, "/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "not ready");
        assert_eq!(json["database"], "disconnected");
    }

    #[tokio::test]
    async fn test_products_are_nested() {
        let models: Vec<domain_products::entity::Model> = Vec::new();
        let db = mock_db().append_query_results([models]).into_connection();
        let app = routes(&state(db));

        let (status, body) = send(app, "/products").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!([]));
    }
}
