//! Product CRUD handlers: create, list, search, get, update, delete.
//!
//! Handlers are stateless; each validates its input, issues the repository
//! call, and shapes the response. Everything they do not special-case
//! propagates to the AppError translation.

use crate::error::{AppError, ErrorBody};
use crate::model::{NewProduct, ProductPatch, ProductRecord, ProductView};
use crate::query::{PageParams, ProductFilter};
use crate::repo::ProductRepo;
use crate::response::{DeletedBody, PageEnvelope};
use crate::state::AppState;
use crate::validation;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("invalid product id".to_string()))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = ProductRecord),
        (status = 400, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut body = body_to_map(body)?;
    validation::coerce_price(&mut body);
    let input = validation::validate(&body).map_err(AppError::Validation)?;
    let record = ProductRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, default 5"),
        ("page" = Option<i64>, Query, description = "1-based page number, default 1")
    ),
    responses((status = 200, description = "One page of products", body = PageEnvelope))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageParams::from_query(&params);
    let (rows, total) =
        ProductRepo::find_page(&state.pool, &ProductFilter::default(), &page).await?;
    Ok(Json(PageEnvelope::new(total, &page, rows)))
}

#[utoipa::path(
    get,
    path = "/products/search",
    tag = "products",
    params(
        ("name" = Option<String>, Query, description = "Name substring"),
        ("category" = Option<String>, Query, description = "Category substring"),
        ("limit" = Option<i64>, Query, description = "Page size, default 5"),
        ("page" = Option<i64>, Query, description = "1-based page number, default 1")
    ),
    responses((status = 200, description = "Matching page of products", body = PageEnvelope))
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ProductFilter::from_query(&params);
    let page = PageParams::from_query(&params);
    let (rows, total) = ProductRepo::find_page(&state.pool, &filter, &page).await?;
    Ok(Json(PageEnvelope::new(total, &page, rows)))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductView),
        (status = 404, description = "No such product", body = ErrorBody)
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let view = ProductRepo::find_view(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(view))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Updated product", body = ProductView),
        (status = 400, description = "Validation failed or invalid price", body = ErrorBody),
        (status = 404, description = "No such product", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let existing = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut body = body_to_map(body)?;
    // A string price must parse before any validation runs; the row is
    // untouched on failure.
    let coerced = match body.get("price") {
        Some(Value::String(raw)) => Some(
            raw.trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .ok_or(AppError::InvalidPrice)?,
        ),
        _ => None,
    };
    if let Some(n) = coerced {
        body.insert("price".to_string(), Value::Number(n));
    }

    let merged = validation::merge_record(&existing, &body);
    validation::validate(&merged).map_err(AppError::Validation)?;

    let patch = ProductPatch::from_body(&body);
    ProductRepo::update(&state.pool, id, &patch).await?;
    let view = ProductRepo::find_view(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(view))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product removed", body = DeletedBody),
        (status = 404, description = "No such product", body = ErrorBody)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let removed = ProductRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(DeletedBody::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn body_to_map_rejects_non_objects() {
        assert!(body_to_map(Value::Object(Map::new())).is_ok());
        assert!(matches!(
            body_to_map(Value::Array(Vec::new())),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            body_to_map(Value::String("x".into())),
            Err(AppError::BadRequest(_))
        ));
    }
}
