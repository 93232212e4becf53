//! Pagination types for list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{DEFAULT_PAGE_NUMBER, MAX_PAGE_NUMBER, PER_PAGE};

/// Pagination query parameters.
///
/// `page` is parsed leniently: a missing, zero, negative or non-numeric
/// value selects the first page instead of rejecting the request. Numbers
/// past [`MAX_PAGE_NUMBER`] are clamped to it, which is always an empty page.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Current page number (1-based, 20 records per page)
    #[param(value_type = Option<u64>, example = 1)]
    pub page: Option<String>,
}

impl PaginationParams {
    pub fn for_page(page: u64) -> Self {
        Self {
            page: Some(page.to_string()),
        }
    }

    /// Effective 1-based page number
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .map(|p| p.min(MAX_PAGE_NUMBER))
            .unwrap_or(DEFAULT_PAGE_NUMBER)
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * PER_PAGE
    }

    /// Page size
    pub fn limit(&self) -> u64 {
        PER_PAGE
    }
}

/// One page of results plus the overall total.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Transform every item, keeping the total
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>) -> PaginationParams {
        PaginationParams {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_first_page_by_default() {
        assert_eq!(params(None).page(), 1);
        assert_eq!(params(None).offset(), 0);
    }

    #[test]
    fn test_offset_uses_fixed_page_size() {
        assert_eq!(params(Some("2")).offset(), 20);
        assert_eq!(params(Some("3")).offset(), 40);
        assert_eq!(params(Some("3")).limit(), 20);
    }

    #[test]
    fn test_invalid_page_falls_back_to_first() {
        assert_eq!(params(Some("0")).page(), 1);
        assert_eq!(params(Some("-1")).page(), 1);
        assert_eq!(params(Some("abc")).page(), 1);
        assert_eq!(params(Some("")).page(), 1);
    }

    #[test]
    fn test_huge_page_is_clamped_without_overflow() {
        let huge = params(Some("18446744073709551615"));
        assert_eq!(huge.page(), MAX_PAGE_NUMBER);
        assert!(huge.offset() <= i64::MAX as u64);
        assert_eq!(params(Some(MAX_PAGE_NUMBER.to_string().as_str())).page(), MAX_PAGE_NUMBER);
    }

    #[test]
    fn test_page_map_keeps_total() {
        let page = Page::new(vec![1, 2], 7).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 7);
    }
}
