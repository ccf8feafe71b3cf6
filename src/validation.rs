//! Product payload validation and normalization.
//!
//! Pure and synchronous: callers hand in the parsed JSON body and get back
//! either a normalized record or the full list of field violations.

use crate::error::FieldViolation;
use crate::model::{NewProduct, Product};
use serde_json::{Map, Number, Value};

/// Replace a numeric-string `price` with its number form. Strings that do
/// not parse to a finite float are left untouched so validation reports them.
pub fn coerce_price(body: &mut Map<String, Value>) {
    let coerced = match body.get("price") {
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok().and_then(Number::from_f64),
        _ => None,
    };
    if let Some(n) = coerced {
        body.insert("price".to_string(), Value::Number(n));
    }
}

/// Validate a product body against the full schema and normalize it.
/// Violations are collected across all fields; unknown fields are ignored.
pub fn validate(body: &Map<String, Value>) -> Result<NewProduct, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let name = required_text(body, "name", "Name is required", "Name must be a string", &mut violations);

    let price = match body.get("price") {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new("price", "Price is required"));
            None
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v > 0.0 => Some(v),
            _ => {
                violations.push(FieldViolation::new("price", "Price must be a positive number"));
                None
            }
        },
        Some(_) => {
            violations.push(FieldViolation::new("price", "Price must be a number"));
            None
        }
    };

    let description = match body.get("description") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(FieldViolation::new("description", "Description must be a string"));
            None
        }
    };

    let category = required_text(
        body,
        "category",
        "Category is required",
        "Category must be a string",
        &mut violations,
    );

    match (name, price, category) {
        (Some(name), Some(price), Some(category)) if violations.is_empty() => Ok(NewProduct {
            name,
            price,
            description,
            category,
        }),
        _ => Err(violations),
    }
}

/// Build the validation candidate for an update: the existing record's
/// values overlaid with the supplied fields. A stored NULL description is
/// omitted rather than surfaced as JSON null.
pub fn merge_record(existing: &Product, body: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = Map::new();
    merged.insert("name".to_string(), Value::String(existing.name.clone()));
    if let Some(n) = Number::from_f64(existing.price) {
        merged.insert("price".to_string(), Value::Number(n));
    }
    if let Some(d) = &existing.description {
        merged.insert("description".to_string(), Value::String(d.clone()));
    }
    merged.insert("category".to_string(), Value::String(existing.category.clone()));
    for (k, v) in body {
        merged.insert(k.clone(), v.clone());
    }
    merged
}

fn required_text(
    body: &Map<String, Value>,
    field: &str,
    required_msg: &str,
    type_msg: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new(field, required_msg));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(FieldViolation::new(field, required_msg));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(FieldViolation::new(field, type_msg));
            None
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

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn valid_payload_normalizes() {
        let body = map(json!({
            "name": "Trail shoe",
            "price": 89.5,
            "category": "footwear"
        }));
        let product = validate(&body).unwrap();
        assert_eq!(
            product,
            NewProduct {
                name: "Trail shoe".into(),
                price: 89.5,
                description: None,
                category: "footwear".into(),
            }
        );
    }

    #[test]
    fn description_is_optional_but_kept_when_present() {
        let body = map(json!({
            "name": "Mug",
            "price": 4.0,
            "description": "Ceramic",
            "category": "kitchen"
        }));
        let product = validate(&body).unwrap();
        assert_eq!(product.description.as_deref(), Some("Ceramic"));
    }

    #[test]
    fn missing_name_is_a_violation() {
        let body = map(json!({"price": 10.0, "category": "misc"}));
        let violations = validate(&body).unwrap_err();
        assert_eq!(fields(&violations), vec!["name"]);
        assert_eq!(violations[0].message, "Name is required");
    }

    #[test]
    fn empty_name_is_a_violation() {
        let body = map(json!({"name": "", "price": 10.0, "category": "misc"}));
        let violations = validate(&body).unwrap_err();
        assert_eq!(fields(&violations), vec!["name"]);
    }

    #[test]
    fn zero_and_negative_price_are_violations() {
        for price in [0.0, -3.5] {
            let body = map(json!({"name": "Mug", "price": price, "category": "kitchen"}));
            let violations = validate(&body).unwrap_err();
            assert_eq!(fields(&violations), vec!["price"]);
            assert_eq!(violations[0].message, "Price must be a positive number");
        }
    }

    #[test]
    fn non_numeric_price_string_stays_a_violation_after_coercion() {
        let mut body = map(json!({"name": "Mug", "price": "abc", "category": "kitchen"}));
        coerce_price(&mut body);
        let violations = validate(&body).unwrap_err();
        assert_eq!(fields(&violations), vec!["price"]);
    }

    #[test]
    fn numeric_price_string_coerces_to_number() {
        let mut body = map(json!({"name": "Mug", "price": "19.99", "category": "kitchen"}));
        coerce_price(&mut body);
        assert_eq!(body.get("price"), Some(&json!(19.99)));
        let product = validate(&body).unwrap();
        assert_eq!(product.price, 19.99);
    }

    #[test]
    fn violations_are_collected_not_first_fail() {
        let body = map(json!({"price": -1}));
        let violations = validate(&body).unwrap_err();
        let mut seen = fields(&violations);
        seen.sort();
        assert_eq!(seen, vec!["category", "name", "price"]);
    }

    #[test]
    fn null_description_is_a_violation() {
        let body = map(json!({
            "name": "Mug",
            "price": 4.0,
            "description": null,
            "category": "kitchen"
        }));
        let violations = validate(&body).unwrap_err();
        assert_eq!(fields(&violations), vec!["description"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = map(json!({
            "name": "Mug",
            "price": 4.0,
            "category": "kitchen",
            "stock": 12
        }));
        assert!(validate(&body).is_ok());
    }

    fn sample_product() -> Product {
        Product {
            id: 7,
            name: "Trail shoe".into(),
            price: 89.5,
            description: None,
            category: "footwear".into(),
        }
    }

    #[test]
    fn merge_overlays_supplied_fields() {
        let body = map(json!({"price": 99.0}));
        let merged = merge_record(&sample_product(), &body);
        assert_eq!(merged.get("price"), Some(&json!(99.0)));
        assert_eq!(merged.get("name"), Some(&json!("Trail shoe")));
        assert_eq!(merged.get("category"), Some(&json!("footwear")));
    }

    #[test]
    fn merge_omits_stored_null_description() {
        let merged = merge_record(&sample_product(), &Map::new());
        assert!(!merged.contains_key("description"));
        assert!(validate(&merged).is_ok());
    }

    #[test]
    fn merge_keeps_stored_description_when_present() {
        let mut existing = sample_product();
        existing.description = Some("Waterproof".into());
        let merged = merge_record(&existing, &map(json!({"name": "Road shoe"})));
        assert_eq!(merged.get("description"), Some(&json!("Waterproof")));
        assert_eq!(merged.get("name"), Some(&json!("Road shoe")));
    }
}
