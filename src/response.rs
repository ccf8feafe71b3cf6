//! Response envelopes for list/search and fixed message bodies.

use crate::model::Product;
use crate::query::PageParams;
use serde::Serialize;
use utoipa::ToSchema;

/// Pagination wrapper returned by list and search.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub data: Vec<Product>,
}

impl PageEnvelope {
    pub fn new(total_items: i64, page: &PageParams, data: Vec<Product>) -> Self {
        PageEnvelope {
            total_items,
            total_pages: total_pages(total_items, page.limit),
            current_page: page.page,
            data,
        }
    }
}

/// ceil(total_items / limit). `limit` is at least 1 (PageParams guarantees
/// it), so 0 items yields 0 pages.
pub fn total_pages(total_items: i64, limit: i64) -> i64 {
    (total_items + limit - 1) / limit
}

/// Fixed body for successful deletes.
#[derive(Serialize, ToSchema)]
pub struct DeletedBody {
    pub msg: String,
}

impl Default for DeletedBody {
    fn default() -> Self {
        DeletedBody {
            msg: "Successfully deleted".to_string(),
        }
    }
}
