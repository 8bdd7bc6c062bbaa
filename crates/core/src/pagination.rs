//! Page-number pagination with strict bounds.
//!
//! Out-of-range requests are rejected instead of clamped, so a client asking
//! for `page_size=10000` learns about the limit rather than silently
//! receiving fewer rows than it expects.

use serde::Serialize;

use crate::error::CoreError;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 25;
/// Upper bound on `page_size` unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// Validate `page >= 1` and `1 <= page_size <= max_page_size`, and that
    /// the resulting row offset fits in an `i64`.
    pub fn new(
        page: Option<i64>,
        page_size: Option<i64>,
        max_page_size: i64,
    ) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(CoreError::Validation(
                "page must be an integer of at least 1.".to_string(),
            ));
        }
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE.min(max_page_size));
        if page_size < 1 || page_size > max_page_size {
            return Err(CoreError::Validation(format!(
                "page_size must be between 1 and {max_page_size}."
            )));
        }
        if (page - 1).checked_mul(page_size).is_none() {
            return Err(CoreError::Validation(format!(
                "page {page} is out of range for page_size {page_size}."
            )));
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the metadata needed to request the next.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        let total_pages = if total > 0 {
            (total + request.page_size - 1) / request.page_size
        } else {
            0
        };
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages,
        }
    }
}
