//! Parameterized SQL for the dynamic product queries.
//!
//! Only the shapes that vary by request are built here (search filter and
//! pagination); the fixed single-row statements live in `crate::repo`.

use crate::query::ProductFilter;

pub const PRODUCT_COLUMNS: &str = "id, name, price, description, category";

/// SQL text plus its ordered bind parameters (all text).
#[derive(Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: String) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// SELECT one page of products in id order.
pub fn select_page(filter: &ProductFilter, limit: i64, offset: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(filter, &mut q);
    q.sql = format!(
        "SELECT {} FROM products{} ORDER BY id LIMIT {} OFFSET {}",
        PRODUCT_COLUMNS, where_sql, limit, offset
    );
    q
}

/// COUNT of all rows matching the filter, ignoring pagination.
pub fn count_products(filter: &ProductFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(filter, &mut q);
    q.sql = format!("SELECT COUNT(*) FROM products{}", where_sql);
    q
}

/// WHERE clause from the substring filters. Fragments become `%fragment%`
/// LIKE patterns; conditions are ANDed.
fn where_clause(filter: &ProductFilter, q: &mut QueryBuf) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &filter.name {
        let n = q.push_param(format!("%{}%", name));
        parts.push(format!("name LIKE ${}", n));
    }
    if let Some(category) = &filter.category {
        let n = q.push_param(format!("%{}%", category));
        parts.push(format!("category LIKE ${}", n));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_without_filter_has_no_where() {
        let q = select_page(&ProductFilter::default(), 5, 0);
        assert_eq!(
            q.sql,
            "SELECT id, name, price, description, category FROM products ORDER BY id LIMIT 5 OFFSET 0"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn page_query_with_both_filters_ands_conditions() {
        let filter = ProductFilter {
            name: Some("shoe".into()),
            category: Some("foot".into()),
        };
        let q = select_page(&filter, 2, 2);
        assert_eq!(
            q.sql,
            "SELECT id, name, price, description, category FROM products \
             WHERE name LIKE $1 AND category LIKE $2 ORDER BY id LIMIT 2 OFFSET 2"
        );
        assert_eq!(q.params, vec!["%shoe%".to_string(), "%foot%".to_string()]);
    }

    #[test]
    fn category_only_filter_binds_first_placeholder() {
        let filter = ProductFilter {
            name: None,
            category: Some("kitchen".into()),
        };
        let q = select_page(&filter, 5, 0);
        assert!(q.sql.contains("WHERE category LIKE $1"));
        assert_eq!(q.params, vec!["%kitchen%".to_string()]);
    }

    #[test]
    fn count_query_shares_the_filter_shape() {
        let filter = ProductFilter {
            name: Some("mug".into()),
            category: None,
        };
        let q = count_products(&filter);
        assert_eq!(q.sql, "SELECT COUNT(*) FROM products WHERE name LIKE $1");
        assert_eq!(q.params, vec!["%mug%".to_string()]);
    }

    #[test]
    fn count_query_without_filter_counts_everything() {
        let q = count_products(&ProductFilter::default());
        assert_eq!(q.sql, "SELECT COUNT(*) FROM products");
        assert!(q.params.is_empty());
    }
}
