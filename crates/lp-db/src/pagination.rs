use serde::{Deserialize, Serialize};

/// 1-based page window.
///
/// The query layer does not clamp: callers are expected to pass `page >= 1` and
/// `limit > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: i64,
    /// Maximum rows per page
    pub limit: i64,
}

impl PageRequest {
    pub const fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Number of rows to skip before this page. Saturates instead of overflowing.
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Rows matching the filter, independent of the page window
    pub total_items: i64,
}

impl<T> Paginated<T> {
    /// Number of pages needed to cover `total_items` at `limit` rows per page.
    pub const fn total_pages(&self, limit: i64) -> i64 {
        if limit <= 0 {
            return 0;
        }
        (self.total_items + limit - 1) / limit
    }
}
