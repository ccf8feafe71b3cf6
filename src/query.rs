//! Translation of query-string parameters into filter and pagination
//! descriptors. Pure; the SQL text is built in `crate::sql`.

use std::collections::HashMap;

pub const DEFAULT_LIMIT: i64 = 5;

/// Page window. Missing, non-numeric, and non-positive values silently fall
/// back to the defaults (limit 5, page 1).
#[derive(Clone, Debug, PartialEq)]
pub struct PageParams {
    pub limit: i64,
    pub page: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        PageParams {
            limit: DEFAULT_LIMIT,
            page: 1,
        }
    }
}

impl PageParams {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        PageParams {
            limit: positive_or(params.get("limit"), DEFAULT_LIMIT),
            page: positive_or(params.get("page"), 1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

fn positive_or(raw: Option<&String>, default: i64) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

/// Substring filters for search. Empty parameters impose no constraint;
/// conditions are ANDed when both are present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        ProductFilter {
            name: fragment(params.get("name")),
            category: fragment(params.get("category")),
        }
    }
}

fn fragment(raw: Option<&String>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).cloned()
}
