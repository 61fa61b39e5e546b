//! Page-number pagination shared by the list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::error::{Result, WorkforceError};

/// Raw `?page=&page_size=` query parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// A resolved, bounds-checked page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Pages are 1-based. A missing or zero `page_size` takes the default and
    /// oversized requests are clamped to the configured maximum.
    pub fn resolve(params: PageParams, config: &PaginationConfig) -> Result<Self> {
        let page = params.page.unwrap_or(1);
        if page == 0 {
            return Err(WorkforceError::InvalidPage);
        }
        let page_size = match params.page_size {
            Some(0) | None => config.default_page_size,
            Some(size) => size.min(config.max_page_size),
        };
        Ok(Self { page, page_size })
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page; asking past the last page (other than an empty first
    /// page) is an error
    pub fn new(request: PageRequest, count: i64, results: Vec<T>) -> Result<Self> {
        if request.page > 1 && request.offset() >= count {
            return Err(WorkforceError::InvalidPage);
        }
        let next = (request.offset() + request.limit() < count).then(|| request.page + 1);
        let previous = (request.page > 1).then(|| request.page - 1);
        Ok(Self {
            count,
            next,
            previous,
            results,
        })
    }
}
