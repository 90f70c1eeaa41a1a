// ABOUTME: Pagination utilities for list endpoints
// ABOUTME: Provides standardized query parameters and response metadata

use serde::{Deserialize, Serialize};

/// Maximum page size to prevent performance issues
pub const MAX_PAGE_SIZE: i64 = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Pagination parameters for list queries
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    pub page: i64,
    pub limit: i64,
}

impl PaginationParams {
    /// Create pagination params from raw query values
    pub fn with_page_and_limit(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Validate and normalize pagination parameters
    /// Returns (limit, offset) suitable for SQL queries
    pub fn validate(&self) -> (i64, i64) {
        let page = self.page.max(MIN_PAGE);
        let limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        (limit, offset)
    }

    /// Get SQL LIMIT clause value
    pub fn limit(&self) -> i64 {
        self.validate().0
    }

    /// Get SQL OFFSET clause value
    pub fn offset(&self) -> i64 {
        self.validate().1
    }

    /// Get the current page number
    pub fn page(&self) -> i64 {
        self.page.max(MIN_PAGE)
    }
}

/// Metadata about pagination state
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    #[serde(rename = "currentPage")]
    pub current_page: i64,

    /// Items per page
    #[serde(rename = "pageSize")]
    pub page_size: i64,

    /// Total number of items across all pages
    #[serde(rename = "totalItems")]
    pub total_items: i64,

    /// Total number of pages
    #[serde(rename = "totalPages")]
    pub total_pages: i64,

    /// Whether there is a next page
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,

    /// Whether there is a previous page
    #[serde(rename = "hasPreviousPage")]
    pub has_previous_page: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from params and total count
    pub fn new(params: &PaginationParams, total_items: i64) -> Self {
        let current_page = params.page();
        let page_size = params.limit();
        let total_pages = if page_size > 0 {
            (total_items + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            current_page,
            page_size,
            total_items,
            total_pages,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > MIN_PAGE,
        }
    }
}
