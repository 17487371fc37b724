use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};

/// Largest magnitude a `NUMERIC(14, 2)` column holds.
const MAX_PRICE: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2); // 999_999_999_999.99

/// Product category
///
/// Wire and database names are the uppercase variant names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Category {
    #[default]
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

impl Category {
    /// Case-insensitive lookup used by the list filter.
    pub fn parse_filter(value: &str) -> ProductResult<Self> {
        value
            .parse()
            .map_err(|_| ProductError::UnknownCategory(value.to_string()))
    }
}

/// A catalog product as stored and as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Storage-assigned identifier
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Serialized as a decimal string, e.g. `"12.50"`
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    pub fn new(id: i32, payload: ProductPayload) -> Self {
        let mut product = Self {
            id,
            name: String::new(),
            description: None,
            price: Decimal::ZERO,
            available: true,
            category: Category::Unknown,
        };
        product.apply(payload);
        product
    }

    /// Overwrites every mutable field from `payload`; `id` is kept.
    pub fn apply(&mut self, payload: ProductPayload) {
        self.name = payload.name;
        self.description = payload.description;
        self.price = normalize_price(payload.price);
        self.available = payload.available;
        self.category = payload.category;
    }
}

/// Body of create and update requests.
///
/// Unknown keys, including `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 250))]
    pub description: Option<String>,
    /// Decimal string or number
    #[schema(value_type = String, example = "12.50")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl From<Product> for ProductPayload {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            description: product.description,
            price: product.price,
            available: product.available,
            category: product.category,
        }
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.abs() > MAX_PRICE {
        return Err(ValidationError::new("range")
            .with_message("price exceeds 999999999999.99".into()));
    }
    Ok(())
}

/// Rounds half away from zero to a fixed scale of 2, matching `NUMERIC(14, 2)`.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut cents = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

/// `"true"`, `"yes"` and `"1"` (any case) are true; everything else is false.
pub fn parse_availability(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}

/// Query string of `GET /products`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact product name
    pub name: Option<String>,
    /// Category name, case-insensitive
    pub category: Option<String>,
    /// `true`, `yes` or `1` for available products; anything else for unavailable
    pub available: Option<String>,
}

/// The single filter a list request resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Name(String),
    Category(Category),
    Available(bool),
}

impl ProductQuery {
    /// Picks one filter: `name`, then `category`, then `available`.
    ///
    /// Empty values count as absent.
    pub fn into_filter(self) -> ProductResult<ProductFilter> {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        if let Some(name) = present(self.name) {
            return Ok(ProductFilter::Name(name));
        }
        if let Some(category) = present(self.category) {
            return Category::parse_filter(&category).map(ProductFilter::Category);
        }
        if let Some(available) = present(self.available) {
            return Ok(ProductFilter::Available(parse_availability(&available)));
        }
        Ok(ProductFilter::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn payload() -> ProductPayload {
        ProductPayload {
            name: "Hammer".to_string(),
            description: Some("Claw hammer".to_string()),
            price: Decimal::new(1250, 2),
            available: true,
            category: Category::Tools,
        }
    }

    #[test]
    fn test_max_price_constant() {
        assert_eq!(MAX_PRICE, Decimal::from_str("999999999999.99").unwrap());
    }

    #[test]
    fn test_product_serializes_wire_shape() {
        let product = Product::new(7, payload());
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "Hammer",
                "description": "Claw hammer",
                "price": "12.50",
                "available": true,
                "category": "TOOLS"
            })
        );
    }

    #[test]
    fn test_payload_round_trips_through_product_json() {
        let product = Product::new(3, payload());
        let json = serde_json::to_string(&product).unwrap();

        let back: ProductPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload());
    }

    #[test]
    fn test_payload_ignores_id_and_unknown_keys() {
        let parsed: ProductPayload = serde_json::from_value(json!({
            "id": 999,
            "name": "Bread",
            "price": 3.5,
            "available": false,
            "category": "FOOD",
            "colour": "brown"
        }))
        .unwrap();

        assert_eq!(parsed.name, "Bread");
        assert_eq!(parsed.description, None);
        assert_eq!(parsed.price, Decimal::new(35, 1));
        assert_eq!(parsed.category, Category::Food);
    }

    #[test]
    fn test_payload_rejects_bad_fields() {
        let base = json!({
            "name": "Bread",
            "price": "3.50",
            "available": true,
            "category": "FOOD"
        });

        let mut missing_name = base.clone();
        missing_name.as_object_mut().unwrap().remove("name");
        assert!(serde_json::from_value::<ProductPayload>(missing_name).is_err());

        let mut lowercase_category = base.clone();
        lowercase_category["category"] = json!("food");
        assert!(serde_json::from_value::<ProductPayload>(lowercase_category).is_err());

        let mut bad_price = base.clone();
        bad_price["price"] = json!("cheap");
        assert!(serde_json::from_value::<ProductPayload>(bad_price).is_err());

        let mut bad_available = base;
        bad_available["available"] = json!("yes");
        assert!(serde_json::from_value::<ProductPayload>(bad_available).is_err());
    }

    #[test]
    fn test_payload_validation() {
        assert!(payload().validate().is_ok());

        let mut empty_name = payload();
        empty_name.name = String::new();
        assert!(empty_name.validate().is_err());

        let mut long_description = payload();
        long_description.description = Some("x".repeat(251));
        assert!(long_description.validate().is_err());

        let mut huge_price = payload();
        huge_price.price = Decimal::from_str("1000000000000").unwrap();
        let err = huge_price.validate().unwrap_err();
        assert!(err.field_errors().contains_key("price"));
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut product = Product::new(5, payload());
        let mut changed = payload();
        changed.description = Some("Steel hammer".to_string());
        changed.available = false;

        product.apply(changed);

        assert_eq!(product.id, 5);
        assert_eq!(product.description.as_deref(), Some("Steel hammer"));
        assert!(!product.available);
    }

    #[test]
    fn test_normalize_price_uses_two_decimal_places() {
        assert_eq!(normalize_price(Decimal::new(125, 1)).to_string(), "12.50");
        assert_eq!(normalize_price(Decimal::new(12345, 3)).to_string(), "12.35");
        assert_eq!(normalize_price(Decimal::from(4)).to_string(), "4.00");
    }

    #[test]
    fn test_category_parse_filter_is_case_insensitive() {
        assert_eq!(Category::parse_filter("food").unwrap(), Category::Food);
        assert_eq!(Category::parse_filter("HouseWares").unwrap(), Category::Housewares);
        assert_eq!(Category::parse_filter("UNKNOWN").unwrap(), Category::Unknown);
    }

    #[test]
    fn test_category_parse_filter_rejects_unknown() {
        let err = Category::parse_filter("GADGETS").unwrap_err();
        assert!(matches!(err, ProductError::UnknownCategory(ref v) if v == "GADGETS"));
        assert_eq!(err.to_string(), "Unknown category 'GADGETS'");
    }

    #[test]
    fn test_category_display_is_wire_name() {
        assert_eq!(Category::Automotive.to_string(), "AUTOMOTIVE");
    }

    #[test]
    fn test_parse_availability() {
        for truthy in ["true", "TRUE", "Yes", "1"] {
            assert!(parse_availability(truthy), "{truthy} should be true");
        }
        for falsy in ["false", "no", "0", "maybe", ""] {
            assert!(!parse_availability(falsy), "{falsy} should be false");
        }
    }

    #[test]
    fn test_query_filter_precedence() {
        let query = ProductQuery {
            name: Some("Hammer".into()),
            category: Some("TOOLS".into()),
            available: Some("true".into()),
        };
        assert_eq!(
            query.into_filter().unwrap(),
            ProductFilter::Name("Hammer".into())
        );

        let query = ProductQuery {
            name: None,
            category: Some("tools".into()),
            available: Some("true".into()),
        };
        assert_eq!(
            query.into_filter().unwrap(),
            ProductFilter::Category(Category::Tools)
        );

        let query = ProductQuery {
            available: Some("no".into()),
            ..Default::default()
        };
        assert_eq!(query.into_filter().unwrap(), ProductFilter::Available(false));
    }

    #[test]
    fn test_query_empty_values_count_as_absent() {
        let query = ProductQuery {
            name: Some(String::new()),
            category: Some(String::new()),
            available: Some("yes".into()),
        };
        assert_eq!(query.into_filter().unwrap(), ProductFilter::Available(true));

        assert_eq!(
            ProductQuery::default().into_filter().unwrap(),
            ProductFilter::All
        );
    }

    #[test]
    fn test_query_unknown_category_is_error() {
        let query = ProductQuery {
            category: Some("gadgets".into()),
            ..Default::default()
        };
        assert!(matches!(
            query.into_filter(),
            Err(ProductError::UnknownCategory(_))
        ));
    }
}
