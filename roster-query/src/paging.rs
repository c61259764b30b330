//! Page and limit bookkeeping for list queries.
//!
//! Pages are 1-indexed; the offset sent to the network is derived, never
//! stored. The engine resets to page 1 whenever committed criteria change,
//! so a stale page number can never combine with new criteria into an
//! out-of-range offset.
//!
//! ```rust
//! use roster_query::paging::Paging;
//!
//! let mut paging = Paging::new(25);
//! paging.set_page(3);
//! assert_eq!(paging.offset(), 50);
//!
//! paging.reset();
//! assert_eq!(paging.page(), 1);
//! assert_eq!(paging.limit(), 25);
//! ```

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_LIMIT: u64 = 20;

/// Page/limit state for one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    page: u64,
    limit: u64,
}

impl Paging {
    /// Create paging state at page 1 with the given limit.
    ///
    /// A zero limit is clamped to 1; a zero-sized page cannot address
    /// records.
    pub fn new(limit: u64) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
        }
    }

    /// Current page (1-indexed).
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Current page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Offset of the first record on the current page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Move to a page. Page numbers below 1 are clamped to 1.
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Change the page size and return to page 1.
    ///
    /// A limit change re-shapes every page, so the old page number would be
    /// meaningless under the new size.
    pub fn set_limit(&mut self, limit: u64) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    /// Return to page 1, leaving the limit unchanged.
    pub fn reset(&mut self) {
        self.page = 1;
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_formula() {
        let mut paging = Paging::new(10);
        for page in 1..=50u64 {
            paging.set_page(page);
            assert_eq!(paging.offset(), (page - 1) * 10);
        }
    }

    #[test]
    fn test_first_page_has_zero_offset() {
        assert_eq!(Paging::new(100).offset(), 0);
    }

    #[test]
    fn test_reset_keeps_limit() {
        let mut paging = Paging::new(25);
        paging.set_page(7);
        paging.reset();
        assert_eq!(paging.page(), 1);
        assert_eq!(paging.limit(), 25);
    }

    #[test]
    fn test_set_limit_resets_page() {
        let mut paging = Paging::new(10);
        paging.set_page(4);
        paging.set_limit(50);
        assert_eq!(paging.page(), 1);
        assert_eq!(paging.limit(), 50);
    }

    #[test]
    fn test_zero_values_clamped() {
        let mut paging = Paging::new(0);
        assert_eq!(paging.limit(), 1);
        paging.set_page(0);
        assert_eq!(paging.page(), 1);
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(Paging::default().limit(), DEFAULT_LIMIT);
    }
}
