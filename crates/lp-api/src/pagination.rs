//! Query-string pagination for the report endpoints.

use axum::extract::{Query, rejection::QueryRejection};
use lp_db::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// Raw `?page=&limit=` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Apply defaults and bounds. Out-of-range values are rejected rather than clamped.
    pub fn into_request(self) -> Result<PageRequest, ApiError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err(ApiError::Validation(
                "page must be greater than or equal to 1".to_string(),
            ));
        }

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }

        if (page - 1).checked_mul(limit).is_none() {
            return Err(ApiError::Validation("page is out of range".to_string()));
        }

        Ok(PageRequest::new(page, limit))
    }
}

/// Resolve the page window from an extracted query string.
pub fn page_request(
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<PageRequest, ApiError> {
    match query {
        Ok(Query(query)) => query.into_request(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected pagination parameters");
            Err(ApiError::Validation(
                "Invalid pagination parameters".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

/// `{"items": [...], "pagination": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PageResponse<T> {
    pub fn new(page: Paginated<T>, request: PageRequest) -> Self {
        let pagination = PaginationMeta {
            current_page: request.page,
            total_pages: page.total_pages(request.limit),
            total_items: page.total_items,
            items_per_page: request.limit,
        };

        Self {
            items: page.items,
            pagination,
        }
    }
}
