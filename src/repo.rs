//! Repository operations for the products table. Each method is a single
//! statement (find_page runs the count and the page select).

use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductPatch, ProductRecord, ProductView};
use crate::query::{PageParams, ProductFilter};
use crate::sql;
use sqlx::PgPool;

pub struct ProductRepo;

impl ProductRepo {
    /// Insert one product; returns the stored row with its generated id.
    pub async fn create(pool: &PgPool, input: &NewProduct) -> Result<ProductRecord, AppError> {
        let record = sqlx::query_as::<_, ProductRecord>(
            "INSERT INTO products (name, price, description, category) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, price, description, category, created_at, updated_at",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.description.as_deref())
        .bind(&input.category)
        .fetch_one(pool)
        .await?;
        Ok(record)
    }

    /// One page of rows plus the total matching count ignoring pagination.
    pub async fn find_page(
        pool: &PgPool,
        filter: &ProductFilter,
        page: &PageParams,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let count_q = sql::count_products(filter);
        tracing::debug!(sql = %count_q.sql, params = ?count_q.params, "query");
        let mut count = sqlx::query_scalar::<_, i64>(&count_q.sql);
        for p in &count_q.params {
            count = count.bind(p.as_str());
        }
        let total = count.fetch_one(pool).await?;

        let page_q = sql::select_page(filter, page.limit, page.offset());
        tracing::debug!(sql = %page_q.sql, params = ?page_q.params, "query");
        let mut rows = sqlx::query_as::<_, Product>(&page_q.sql);
        for p in &page_q.params {
            rows = rows.bind(p.as_str());
        }
        let data = rows.fetch_all(pool).await?;
        Ok((data, total))
    }

    /// Fetch a full row by id, or None.
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>, AppError> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, description, category FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Fetch the client projection (id omitted) by id, or None.
    pub async fn find_view(pool: &PgPool, id: i32) -> Result<Option<ProductView>, AppError> {
        let row = sqlx::query_as::<_, ProductView>(
            "SELECT name, price, description, category FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Apply the supplied fields to one row; absent fields keep their stored
    /// value. Bumps updated_at. Returns the number of rows matched.
    pub async fn update(pool: &PgPool, id: i32, patch: &ProductPatch) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE products SET \
             name = COALESCE($2, name), \
             price = COALESCE($3, price), \
             description = COALESCE($4, description), \
             category = COALESCE($5, category), \
             updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(patch.description.as_deref())
        .bind(patch.category.as_deref())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete one row; returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
