use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, Product, ProductPayload};

/// Repository trait for Product persistence
///
/// Every list operation returns products ordered by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products
    async fn all(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn find(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Products whose name equals `name` exactly
    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>>;

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>>;

    /// Insert a new product; the repository assigns the id
    async fn create(&self, input: ProductPayload) -> ProductResult<Product>;

    /// Overwrite the stored row for `product.id`
    async fn update(&self, product: &Product) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        let store = self.store.read().await;
        store
            .products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.name == name).await)
    }

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.category == category).await)
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.available == available).await)
    }

    async fn create(&self, input: ProductPayload) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let product = Product::new(store.last_id, input);
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: &Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let stored = store
            .products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        stored.apply(product.clone().into());

        tracing::info!(product_id = product.id, "Updated product");
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn input(name: &str, category: Category, available: bool) -> ProductPayload {
        ProductPayload {
            name: name.to_string(),
            description: None,
            price: Decimal::new(499, 2),
            available,
            category,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(input("Apple", Category::Food, true)).await.unwrap();
        let second = repo.create(input("Pear", Category::Food, true)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(input("Apple", Category::Food, true)).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let second = repo.create(input("Pear", Category::Food, true)).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(input("Saw", Category::Tools, true)).await.unwrap();
        let fetched = repo.find(product.id).await.unwrap();

        assert_eq!(fetched, Some(product));
        assert_eq!(repo.find(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_finders_filter_and_keep_id_order() {
        let repo = InMemoryProductRepository::new();
        repo.create(input("Saw", Category::Tools, true)).await.unwrap();
        repo.create(input("Bread", Category::Food, false)).await.unwrap();
        repo.create(input("Drill", Category::Tools, false)).await.unwrap();
        repo.create(input("Saw", Category::Tools, false)).await.unwrap();

        let ids = |products: Vec<Product>| products.into_iter().map(|p| p.id).collect::<Vec<_>>();

        assert_eq!(ids(repo.all().await.unwrap()), vec![1, 2, 3, 4]);
        assert_eq!(ids(repo.find_by_name("Saw").await.unwrap()), vec![1, 4]);
        assert!(repo.find_by_name("saw").await.unwrap().is_empty());
        assert_eq!(
            ids(repo.find_by_category(Category::Tools).await.unwrap()),
            vec![1, 3, 4]
        );
        assert_eq!(
            ids(repo.find_by_availability(false).await.unwrap()),
            vec![2, 3, 4]
        );
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let repo = InMemoryProductRepository::new();
        let mut product = repo.create(input("Saw", Category::Tools, true)).await.unwrap();

        product.description = Some("Hand saw".to_string());
        product.available = false;
        let updated = repo.update(&product).await.unwrap();

        assert_eq!(updated, product);
        assert_eq!(repo.find(product.id).await.unwrap(), Some(product));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let ghost = Product::new(42, input("Ghost", Category::Unknown, true));

        let result = repo.update(&ghost).await;
        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(input("Saw", Category::Tools, true)).await.unwrap();

        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert!(repo.all().await.unwrap().is_empty());
    }
}
