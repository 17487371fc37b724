use crate::models::{Category, Product, ProductPayload, normalize_price};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            available: model.available,
            category: model.category,
        }
    }
}

/// Insert model; the id comes from the serial column.
impl From<ProductPayload> for ActiveModel {
    fn from(input: ProductPayload) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(normalize_price(input.price)),
            available: Set(input.available),
            category: Set(input.category),
        }
    }
}

/// Full-row update keyed by `product.id`.
impl From<&Product> for ActiveModel {
    fn from(product: &Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            available: Set(product.available),
            category: Set(product.category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_into_product() {
        let model = Model {
            id: 4,
            name: "Kettle".into(),
            description: None,
            price: Decimal::new(2999, 2),
            available: false,
            category: Category::Housewares,
        };

        let product: Product = model.into();
        assert_eq!(product.id, 4);
        assert_eq!(product.price.to_string(), "29.99");
        assert_eq!(product.category, Category::Housewares);
    }

    #[test]
    fn test_payload_into_active_model_leaves_id_unset() {
        let active: ActiveModel = ProductPayload {
            name: "Kettle".into(),
            description: Some("Electric".into()),
            price: Decimal::new(30, 0),
            available: true,
            category: Category::Housewares,
        }
        .into();

        assert!(active.id.is_not_set());
        assert_eq!(active.price, Set(Decimal::new(3000, 2)));
    }

    #[test]
    fn test_product_into_active_model_sets_id() {
        let product = Product {
            id: 9,
            name: "Wrench".into(),
            description: None,
            price: Decimal::new(850, 2),
            available: true,
            category: Category::Tools,
        };

        let active: ActiveModel = (&product).into();
        assert_eq!(active.id, Set(9));
        assert_eq!(active.category, Set(Category::Tools));
    }
}
