//! Page window arithmetic and total-count metadata.
use serde::Serialize;

use crate::error::ListError;

/// A validated, one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Result<Self, ListError> {
        if page < 1 || page > u32::MAX as i64 {
            return Err(ListError::Validation(format!(
                "page must be a positive integer, got {page}"
            )));
        }
        if page_size < 1 || page_size > u32::MAX as i64 {
            return Err(ListError::Validation(format!(
                "pageSize must be a positive integer, got {page_size}"
            )));
        }
        Ok(Self {
            page: page as u32,
            page_size: page_size as u32,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip. Computed in i64 so large pages cannot overflow.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

/// Pagination metadata returned with every page.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl PageInfo {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let size = request.page_size as i64;
        let total = total.max(0);
        Self {
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages: (total + size - 1) / size,
        }
    }
}
