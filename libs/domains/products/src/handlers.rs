use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        UnsupportedMediaTypeResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Category, Product, ProductPayload, ProductQuery};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductPayload, Category),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Emit an audit event for a modification attempt
fn audit<T, E: std::fmt::Display>(
    action: &str,
    resource: Option<String>,
    result: &Result<T, E>,
    headers: &HeaderMap,
) {
    let (outcome, details) = match result {
        Ok(_) => (AuditOutcome::Success, None),
        Err(e) => (AuditOutcome::Failure, Some(json!({ "error": e.to_string() }))),
    };

    let event = AuditEvent::new(action, resource, outcome).with_request_headers(headers);
    match details {
        Some(details) => event.with_details(details).log(),
        None => event.log(),
    }
}

/// List products, optionally filtered by one of name, category or availability
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    info!("Request to list Products");

    let filter = query.into_filter()?;
    let products = service.list_products(filter).await?;

    info!("Returning {} products", products.len());
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created successfully", body = Product,
            headers(("location" = String, description = "URL of the created product"))),
        (status = 400, response = BadRequestResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ProductPayload>,
) -> ProductResult<impl IntoResponse> {
    info!("Request to create a Product");

    let result = service.create_product(input).await;
    let resource = result.as_ref().ok().map(|p| format!("product:{}", p.id));
    audit("product.create", resource, &result, &headers);
    let product = result?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), product.id);
    info!(product_id = product.id, "Product created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    info!(product_id = id, "Request to read a Product");

    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product; the id in the path wins over any id in the body
///
/// A non-JSON request is a 415 and an unknown id is a 404, both before the
/// body is looked at.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    body: Result<ValidatedJson<ProductPayload>, AppError>,
) -> Result<Json<Product>, AppError> {
    info!(product_id = id, "Request to update a Product");

    let result = match body {
        Ok(ValidatedJson(input)) => service
            .update_product(id, input)
            .await
            .map_err(AppError::from),
        Err(rejection) if rejection.is_unsupported_media_type() => return Err(rejection),
        Err(rejection) => match service.get_product(id).await {
            Ok(_) => Err(rejection),
            Err(e) => Err(e.into()),
        },
    };
    audit("product.update", Some(format!("product:{}", id)), &result, &headers);

    Ok(Json(result?))
}

/// Delete a product; a missing product is still a 204
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    headers: HeaderMap,
) -> ProductResult<StatusCode> {
    info!(product_id = id, "Request to delete a Product");

    let result = service.delete_product(id).await;
    audit("product.delete", Some(format!("product:{}", id)), &result, &headers);
    result?;

    Ok(StatusCode::NO_CONTENT)
}
