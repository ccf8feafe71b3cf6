//! Product row types and the projections exposed by the API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full stored row, returned by create.
#[derive(Serialize, FromRow, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row: the fields exposed by list and search.
#[derive(Serialize, FromRow, Clone, Debug, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
}

/// Single-product projection: id omitted.
#[derive(Serialize, FromRow, Clone, Debug, ToSchema)]
pub struct ProductView {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
}

/// Normalized create payload produced by validation.
#[derive(Clone, Debug, PartialEq, ToSchema)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
}

/// Fields supplied by an update body. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, ToSchema)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ProductPatch {
    /// Extract the supplied fields from a body that already passed merged
    /// validation, so present values are known to have the right shape.
    pub fn from_body(body: &Map<String, Value>) -> Self {
        ProductPatch {
            name: body.get("name").and_then(Value::as_str).map(str::to_owned),
            price: body.get("price").and_then(Value::as_f64),
            description: body
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_owned),
            category: body
                .get("category")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn patch_picks_up_only_supplied_fields() {
        let body = map(json!({"price": 19.99}));
        let patch = ProductPatch::from_body(&body);
        assert_eq!(patch.price, Some(19.99));
        assert_eq!(patch.name, None);
        assert_eq!(patch.description, None);
        assert_eq!(patch.category, None);
    }

    #[test]
    fn patch_with_all_fields() {
        let body = map(json!({
            "name": "Trail shoe",
            "price": 89.5,
            "description": "Waterproof",
            "category": "footwear"
        }));
        let patch = ProductPatch::from_body(&body);
        assert_eq!(patch.name.as_deref(), Some("Trail shoe"));
        assert_eq!(patch.price, Some(89.5));
        assert_eq!(patch.description.as_deref(), Some("Waterproof"));
        assert_eq!(patch.category.as_deref(), Some("footwear"));
    }

    #[test]
    fn patch_ignores_unknown_fields() {
        let body = map(json!({"stock": 12, "name": "Mug"}));
        let patch = ProductPatch::from_body(&body);
        assert_eq!(patch.name.as_deref(), Some("Mug"));
        assert_eq!(patch, ProductPatch { name: Some("Mug".into()), ..Default::default() });
    }
}
