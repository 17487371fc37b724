use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductPayload};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products matching a single filter
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        match filter {
            ProductFilter::All => self.repository.all().await,
            ProductFilter::Name(name) => self.repository.find_by_name(&name).await,
            ProductFilter::Category(category) => self.repository.find_by_category(category).await,
            ProductFilter::Available(available) => {
                self.repository.find_by_availability(available).await
            }
        }
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product
    ///
    /// Validates `input` itself, so callers outside the HTTP layer get the same checks.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: ProductPayload) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Replace every mutable field of an existing product
    ///
    /// The path id wins over anything in the body. An unknown id is reported
    /// before `input` is validated.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: ProductPayload) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;

        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        product.apply(input);
        self.repository.update(&product).await
    }

    /// Delete a product; deleting a missing id is not an error
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(product_id = id, "Delete requested for missing product");
        }
        Ok(())
    }
}
