//! Paging state for the product list view.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductPage;
use crate::error::CommerceError;

/// Products per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Where the product list currently is.
///
/// `total` is whatever the last catalog response reported; paging forward is
/// bounded by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingState {
    /// Current page (1-indexed).
    page: u32,
    /// Items per page.
    page_size: u32,
    /// Total number of items in the catalog.
    total: u64,
}

impl ListingState {
    /// Start on page 1 with the given page size.
    pub fn new(page_size: u32) -> Result<Self, CommerceError> {
        if page_size == 0 {
            return Err(CommerceError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page: 1,
            page_size,
            total: 0,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Record the total reported by a catalog response.
    pub fn record(&mut self, page: &ProductPage) {
        self.total = page.total;
    }

    /// Jump to a specific page.
    pub fn go_to(&mut self, page: u32) -> Result<(), CommerceError> {
        if page == 0 {
            return Err(CommerceError::InvalidPage(page));
        }
        self.page = page;
        Ok(())
    }

    /// Advance one page if there are products beyond this one.
    pub fn next_page(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page unless already on the first.
    pub fn prev_page(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), CommerceError> {
        if page_size == 0 {
            return Err(CommerceError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Number of pages needed for `total` items.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size))
    }

    /// Offset of the first item on the current page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Get start item number (1-indexed), 0 when empty.
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            (self.skip() + 1).min(self.total)
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.page_size)).min(self.total)
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(page_size: u32, total: u64) -> ListingState {
        let mut state = ListingState::new(page_size).unwrap();
        state.record(&ProductPage {
            total,
            ..Default::default()
        });
        state
    }

    #[test]
    fn test_listing_defaults() {
        let state = ListingState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 12);
        assert_eq!(state.skip(), 0);
        assert_eq!(state.total_pages(), 0);
    }

    #[test]
    fn test_next_page_stops_at_last_page() {
        let mut state = listing(12, 30);
        assert_eq!(state.total_pages(), 3);

        assert!(state.next_page());
        assert!(state.next_page());
        assert_eq!(state.page(), 3);
        assert_eq!(state.skip(), 24);

        assert!(!state.next_page());
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn test_exact_multiple_has_no_extra_page() {
        let mut state = listing(10, 20);
        assert!(state.next_page());
        assert!(!state.next_page());
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn test_prev_page_stops_at_first_page() {
        let mut state = listing(12, 30);
        assert!(!state.prev_page());

        state.next_page();
        assert!(state.prev_page());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut state = listing(5, 100);
        state.next_page();
        state.next_page();
        assert_eq!(state.page(), 3);

        state.set_page_size(24).unwrap();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 24);
        assert_eq!(state.total_pages(), 5);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(
            ListingState::new(0),
            Err(CommerceError::InvalidPageSize(0))
        );

        let mut state = ListingState::default();
        assert!(state.set_page_size(0).is_err());
        assert_eq!(state.page_size(), 12);
    }

    #[test]
    fn test_item_range() {
        let mut state = listing(10, 45);
        state.go_to(5).unwrap();
        assert_eq!(state.start_item(), 41);
        assert_eq!(state.end_item(), 45);

        assert_eq!(listing(10, 0).start_item(), 0);
    }

    #[test]
    fn test_go_to_page_zero_rejected() {
        let mut state = ListingState::default();
        assert_eq!(state.go_to(0), Err(CommerceError::InvalidPage(0)));
    }
}
