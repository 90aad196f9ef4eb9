use serde::{Deserialize, Serialize};

/// Page size used when a listing endpoint does not specify its own default.
pub const DEFAULT_LIMIT: i64 = 10;
/// Page size used by the resource search and directory endpoints.
pub const RESOURCE_DEFAULT_LIMIT: i64 = 100;

/// A validated page request. `page` and `limit` are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Parses raw query-string values. Missing, unparseable or non-positive
    /// values fall back to page 1 and `default_limit`.
    pub fn parse(page: Option<&str>, limit: Option<&str>, default_limit: i64) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(1),
            limit: parse_positive(limit).unwrap_or(default_limit),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_LIMIT }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).filter(|v| *v > 0)
}

/// Pagination metadata returned alongside every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_records: i64,
    pub total_pages: i64,
    pub current_page: i64,
    /// `0` when the current page is the last one.
    pub next_page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(total_records: i64, request: PageRequest) -> Self {
        // Overflow-free for any page/limit >= 1, including i64::MAX.
        let total_pages = if total_records <= 0 {
            0
        } else {
            total_records / request.limit + i64::from(total_records % request.limit != 0)
        };
        let next_page = request.page.checked_add(1).filter(|next| *next <= total_pages).unwrap_or(0);
        Self {
            total_records,
            total_pages,
            current_page: request.page,
            next_page,
            limit: request.limit,
        }
    }
}
