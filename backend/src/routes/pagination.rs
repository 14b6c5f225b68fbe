use serde::{Deserialize, Serialize};

use crate::db::Page;

// =========================================================
// Paginated listing envelope
// =========================================================

/// Window metadata attached to every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(page: Page, returned: usize, total: usize) -> Self {
        Self {
            total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.has_more(returned, total),
        }
    }
}

/// `{ data, pagination }` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: Page, total: usize) -> Self {
        let pagination = Pagination::new(page, data.len(), total);
        Self { data, pagination }
    }

    /// Page an already ordered, fully materialized collection.
    pub fn from_ordered(items: Vec<T>, page: Page) -> Self {
        let total = items.len();
        Self::new(page.apply(items), page, total)
    }
}
