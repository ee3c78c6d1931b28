//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 8;
const MAX_PAGE_SIZE: u32 = 100;

/// Page selection for list endpoints (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request from optional query values, clamping to sane bounds
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size as usize
    }

    pub fn limit(&self) -> usize {
        self.page_size as usize
    }
}

/// One page of results plus the totals a client needs to render paging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub page_index: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            page_index: request.page,
            total_pages: Self::calculate_total_pages(total_count, request.page_size),
            page_size: request.page_size,
            total_count,
        }
    }

    /// Slice one page out of a fully materialised, already ordered result
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total_count = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self::new(items, request, total_count)
    }

    fn calculate_total_pages(total: u64, page_size: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        total.div_ceil(page_size as u64) as u32
    }

    pub fn map<U, F>(self, f: F) -> PagedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResponse {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_and_clamping() {
        assert_eq!(PageRequest::new(None, None), PageRequest { page: 1, page_size: 8 });
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, page_size: 1 });
        assert_eq!(PageRequest::new(Some(3), Some(500)).page_size, 100);
        assert_eq!(PageRequest::new(Some(3), Some(8)).offset(), 16);
    }

    #[test]
    fn test_from_vec_slices_page() {
        let page = PagedResponse::from_vec((1..=20).collect::<Vec<_>>(), PageRequest::new(Some(3), Some(8)));
        assert_eq!(page.items, vec![17, 18, 19, 20]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 20);
        assert!(!page.has_next());
    }

    #[test]
    fn test_empty_result() {
        let page = PagedResponse::<u8>::from_vec(vec![], PageRequest::default());
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_map_keeps_totals() {
        let page = PagedResponse::from_vec(vec![1, 2, 3], PageRequest::new(Some(1), Some(2)));
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1", "2"]);
        assert_eq!(mapped.total_pages, 2);
    }
}
