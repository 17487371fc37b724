use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Select,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Category, Product, ProductPayload},
    repository::ProductRepository,
};

/// PostgreSQL-backed repository over the `products` table
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, query: Select<entity::Entity>) -> ProductResult<Vec<Product>> {
        let models = query
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn all(&self) -> ProductResult<Vec<Product>> {
        self.fetch(entity::Entity::find()).await
    }

    async fn find(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        self.fetch(entity::Entity::find().filter(entity::Column::Name.eq(name)))
            .await
    }

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>> {
        self.fetch(entity::Entity::find().filter(entity::Column::Category.eq(category)))
            .await
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        self.fetch(entity::Entity::find().filter(entity::Column::Available.eq(available)))
            .await
    }

    async fn create(&self, input: ProductPayload) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, product: &Product) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = product.into();

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => {
                    ProductError::NotFound(product.id)
                }
                other => other.into(),
            })?;

        tracing::info!(product_id = product.id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
