//! Pagination types for list and search operations.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Page request. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Rows to skip: `(page - 1) * limit`, never negative and never past
    /// `i64::MAX` so it still binds as a SQL OFFSET.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit())
            .min(i64::MAX as u64)
    }

    /// Page size capped at [`MAX_PAGE_SIZE`].
    pub fn limit(&self) -> u64 {
        self.page_size.min(MAX_PAGE_SIZE)
    }

    /// Cut one page out of an already ordered result set.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit()).unwrap_or(usize::MAX))
            .collect()
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results with totals
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: PaginationParams, total: u64) -> Self {
        let page_size = params.limit();
        let total_pages = if page_size > 0 {
            total.div_ceil(page_size)
        } else {
            0
        };

        Self {
            data,
            meta: PaginationMeta {
                page: params.page.max(1),
                page_size,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_clamps_page_zero() {
        assert_eq!(PaginationParams::new(0, 10).offset(), 0);
        assert_eq!(PaginationParams::new(1, 10).offset(), 0);
        assert_eq!(PaginationParams::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_huge_page_saturates() {
        let params = PaginationParams::new(u64::MAX, 10);
        assert_eq!(params.offset(), i64::MAX as u64);
        assert!(params.slice(vec![1, 2, 3]).is_empty());
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(PaginationParams::new(1, 10_000).limit(), MAX_PAGE_SIZE);
        assert_eq!(PaginationParams::new(2, 10_000).offset(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(PaginationParams::new(2, 3).slice(items.clone()), vec![4, 5, 6]);
        assert_eq!(PaginationParams::new(3, 3).slice(items.clone()), vec![7]);
        assert!(PaginationParams::new(4, 3).slice(items).is_empty());
    }

    #[test]
    fn test_total_pages() {
        let page = Paginated::new(vec![1, 2], PaginationParams::new(1, 2), 5);
        assert_eq!(page.meta.total_pages, 3);
        let empty: Paginated<u8> = Paginated::new(vec![], PaginationParams::new(1, 0), 5);
        assert_eq!(empty.meta.total_pages, 0);
    }
}
