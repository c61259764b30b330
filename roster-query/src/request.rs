//! Wire types exchanged with a caller-supplied fetch function.

use serde::{Deserialize, Serialize};

use crate::criteria::{FilterCriterion, SortCriterion};

/// Parameters of one page fetch.
///
/// Carries only committed (sanitized) criteria; live edits never reach the
/// wire directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items to return.
    pub limit: u64,
    /// Number of items to skip.
    pub offset: u64,
    /// Committed filter criteria.
    pub filters: Vec<FilterCriterion>,
    /// Committed sort criteria.
    pub sorts: Vec<SortCriterion>,
}

impl PageRequest {
    /// Create a request with no criteria.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            filters: Vec::new(),
            sorts: Vec::new(),
        }
    }

    /// The minimal existence-check request: one record, no criteria.
    ///
    /// Used to disambiguate "the dataset is empty" from "the current
    /// filters match nothing".
    pub fn probe() -> Self {
        Self::new(1, 0)
    }

    /// Set the filter criteria.
    pub fn filters(mut self, filters: impl IntoIterator<Item = FilterCriterion>) -> Self {
        self.filters = filters.into_iter().collect();
        self
    }

    /// Set the sort criteria.
    pub fn sorts(mut self, sorts: impl IntoIterator<Item = SortCriterion>) -> Self {
        self.sorts = sorts.into_iter().collect();
        self
    }

    /// Canonical serialized form, used as the request's identity.
    ///
    /// Two requests with equal identities would fetch the same page; the
    /// engine compares identities to discard responses that settled after
    /// their query became stale.
    pub fn identity(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// One fetched page of a list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of records matching the criteria, across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Create a page from items and a total count.
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// A page with no items.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Check if the page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
