//! OpenAPI documentation configuration

use axum_helpers::errors::responses::ServiceUnavailableResponse;
use axum_helpers::server::HealthResponse;
use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "0.1.0",
        description = "Create, read, update, delete and filter catalog products"
    ),
    paths(
        axum_helpers::server::health::health_handler,
        crate::api::health::ready_handler
    ),
    components(
        schemas(HealthResponse),
        responses(ServiceUnavailableResponse)
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
