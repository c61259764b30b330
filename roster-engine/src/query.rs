//! The list-query orchestrator.
//!
//! [`ListQuery`] wires the criteria model, debounce timers, pagination, and
//! the query lifecycle to a caller-supplied [`Fetcher`]. It exclusively owns
//! one view's transient state; nothing is shared across views.
//!
//! Setters are synchronous: they update live state and schedule a debounce
//! deadline. [`ListQuery::settle`] then drives the pending work on the
//! caller's task — waits out the quiet window, commits the sanitized
//! criteria, resets pagination when committed criteria changed, issues the
//! main fetch, conditionally issues the existence probe, and resolves the
//! state. Timer callbacks therefore run on the same logical task as state
//! updates, and no synchronization is needed.
//!
//! ```rust
//! use roster_engine::query::ListQuery;
//! use roster_query::{Page, PageRequest};
//!
//! # async fn demo() {
//! let mut query = ListQuery::builder(|request: PageRequest| async move {
//!     Ok::<_, roster_engine::fetch::FetchError>(Page::new(
//!         vec![format!("row at {}", request.offset)],
//!         100,
//!     ))
//! })
//! .limit(25)
//! .build();
//!
//! query.settle().await;
//! assert_eq!(query.total(), 100);
//! # }
//! ```

use std::time::Duration;

use tracing::debug;

use roster_query::{
    sanitize_filters, sanitize_sorts, FieldSet, FilterCriterion, Page, PageRequest, Paging,
    SortCriterion, SortOption, DEFAULT_LIMIT,
};

use crate::debounce::{Debounce, DEFAULT_DEBOUNCE};
use crate::fetch::Fetcher;
use crate::lifecycle::{ListState, MainOutcome, QueryLifecycle};

/// Predicate deciding whether the existence probe runs for a main result.
pub type ProbePredicate<T> = Box<dyn Fn(&Page<T>) -> bool + Send + Sync>;

/// Builder for [`ListQuery`].
pub struct ListQueryBuilder<T, F> {
    fetcher: F,
    fields: FieldSet,
    sort_options: Vec<SortOption>,
    filters: Vec<FilterCriterion>,
    sorts: Vec<SortCriterion>,
    limit: u64,
    debounce: Duration,
    should_probe: ProbePredicate<T>,
    probe_request: PageRequest,
}

impl<T, F> ListQueryBuilder<T, F>
where
    T: Send + 'static,
    F: Fetcher<T>,
{
    /// Start a builder around a fetcher.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            fields: FieldSet::empty(),
            sort_options: Vec::new(),
            filters: Vec::new(),
            sorts: Vec::new(),
            limit: DEFAULT_LIMIT,
            debounce: DEFAULT_DEBOUNCE,
            should_probe: Box::new(|page: &Page<T>| page.is_empty()),
            probe_request: PageRequest::probe(),
        }
    }

    /// Set the view's validated filter-field definitions.
    pub fn fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Set the view's sortable-column definitions.
    pub fn sort_options(mut self, options: impl IntoIterator<Item = SortOption>) -> Self {
        self.sort_options = options.into_iter().collect();
        self
    }

    /// Seed the initial filter criteria.
    pub fn filters(mut self, filters: impl IntoIterator<Item = FilterCriterion>) -> Self {
        self.filters = filters.into_iter().collect();
        self
    }

    /// Seed the initial sort criteria.
    pub fn sorts(mut self, sorts: impl IntoIterator<Item = SortCriterion>) -> Self {
        self.sorts = sorts.into_iter().collect();
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the debounce quiet window.
    pub fn debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Replace the probe predicate.
    ///
    /// The default probes exactly when the main result has no items.
    pub fn should_probe(
        mut self,
        predicate: impl Fn(&Page<T>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_probe = Box::new(predicate);
        self
    }

    /// Replace the probe request with a cheaper resource-specific
    /// existence check.
    pub fn probe_request(mut self, request: PageRequest) -> Self {
        self.probe_request = request;
        self
    }

    /// Build the query.
    ///
    /// Committed criteria are published immediately from the sanitized
    /// seeds; there is no initial debounce wait.
    pub fn build(self) -> ListQuery<T, F> {
        let committed_filters = sanitize_filters(&self.filters, &self.fields);
        let committed_sorts = sanitize_sorts(&self.sorts);

        ListQuery {
            fetcher: self.fetcher,
            fields: self.fields,
            sort_options: self.sort_options,
            seed_filters: self.filters.clone(),
            seed_sorts: self.sorts.clone(),
            live_filters: self.filters,
            live_sorts: self.sorts,
            committed_filters,
            committed_sorts,
            filter_debounce: Debounce::new(self.debounce),
            sort_debounce: Debounce::new(self.debounce),
            paging: Paging::new(self.limit),
            lifecycle: QueryLifecycle::new(),
            should_probe: self.should_probe,
            probe_request: self.probe_request,
            dirty: true,
            disposed: false,
        }
    }
}

/// Orchestrator for one paginated, filterable, sortable list view.
pub struct ListQuery<T, F> {
    fetcher: F,
    fields: FieldSet,
    sort_options: Vec<SortOption>,
    seed_filters: Vec<FilterCriterion>,
    seed_sorts: Vec<SortCriterion>,
    live_filters: Vec<FilterCriterion>,
    live_sorts: Vec<SortCriterion>,
    committed_filters: Vec<FilterCriterion>,
    committed_sorts: Vec<SortCriterion>,
    filter_debounce: Debounce,
    sort_debounce: Debounce,
    paging: Paging,
    lifecycle: QueryLifecycle<T>,
    should_probe: ProbePredicate<T>,
    probe_request: PageRequest,
    dirty: bool,
    disposed: bool,
}

impl<T, F> ListQuery<T, F>
where
    T: Send + 'static,
    F: Fetcher<T>,
{
    /// Start building a query around a fetcher.
    pub fn builder(fetcher: F) -> ListQueryBuilder<T, F> {
        ListQueryBuilder::new(fetcher)
    }

    // ============== Criteria ==============

    /// Live filter criteria, reflecting the latest edit.
    pub fn filters(&self) -> &[FilterCriterion] {
        &self.live_filters
    }

    /// Live sort criteria, reflecting the latest edit.
    pub fn sorts(&self) -> &[SortCriterion] {
        &self.live_sorts
    }

    /// Committed filter criteria: the sanitized projection that reaches
    /// the network.
    pub fn sanitized_filters(&self) -> &[FilterCriterion] {
        &self.committed_filters
    }

    /// Committed sort criteria.
    pub fn sanitized_sorts(&self) -> &[SortCriterion] {
        &self.committed_sorts
    }

    /// The view's sortable-column definitions.
    pub fn sort_options(&self) -> &[SortOption] {
        &self.sort_options
    }

    /// Replace the filter criteria.
    ///
    /// Live state updates synchronously; the commit is deferred by the
    /// debounce window. A rapid series of edits commits once, with the
    /// last value.
    pub fn set_filters(&mut self, filters: impl IntoIterator<Item = FilterCriterion>) {
        self.live_filters = filters.into_iter().collect();
        self.filter_debounce.schedule();
    }

    /// Replace the sort criteria. Debounced like [`Self::set_filters`].
    pub fn set_sorts(&mut self, sorts: impl IntoIterator<Item = SortCriterion>) {
        self.live_sorts = sorts.into_iter().collect();
        self.sort_debounce.schedule();
    }

    // ============== Pagination ==============

    /// Current page (1-indexed).
    pub fn page(&self) -> u64 {
        self.paging.page()
    }

    /// Current page size.
    pub fn limit(&self) -> u64 {
        self.paging.limit()
    }

    /// Offset of the first record on the current page.
    pub fn offset(&self) -> u64 {
        self.paging.offset()
    }

    /// Move to a page and mark the query for re-fetch.
    pub fn set_page(&mut self, page: u64) {
        self.paging.set_page(page);
        self.dirty = true;
    }

    /// Change the page size (returns to page 1) and mark for re-fetch.
    pub fn set_limit(&mut self, limit: u64) {
        self.paging.set_limit(limit);
        self.dirty = true;
    }

    // ============== Results ==============

    /// Items of the current page.
    pub fn items(&self) -> &[T] {
        self.lifecycle.items()
    }

    /// Total number of records matching the committed criteria.
    pub fn total(&self) -> u64 {
        self.lifecycle.total()
    }

    /// Where the query cycle currently stands.
    pub fn state(&self) -> &ListState {
        self.lifecycle.state()
    }

    /// Whether a fetch is outstanding or scheduled.
    ///
    /// A disposed view is never loading.
    pub fn is_loading(&self) -> bool {
        !self.disposed && (self.lifecycle.state().is_loading() || self.dirty)
    }

    // ============== Operations ==============

    /// Re-issue the current query on the next [`Self::settle`].
    pub fn refresh(&mut self) {
        self.dirty = true;
    }

    /// Return to the seed criteria and page 1, cancelling pending commits.
    pub fn reset(&mut self) {
        self.filter_debounce.cancel();
        self.sort_debounce.cancel();
        self.live_filters = self.seed_filters.clone();
        self.live_sorts = self.seed_sorts.clone();
        self.commit_filters();
        self.commit_sorts();
        self.paging.reset();
        self.dirty = true;
    }

    /// Tear the view down: cancel timers and invalidate any in-flight
    /// response so it can never be applied. Subsequent [`Self::settle`]
    /// calls are no-ops.
    pub fn dispose(&mut self) {
        self.filter_debounce.cancel();
        self.sort_debounce.cancel();
        self.lifecycle.invalidate();
        self.dirty = false;
        self.disposed = true;
    }

    /// Drive pending work to completion and return the resolved state.
    ///
    /// Waits out pending debounce windows, commits sanitized criteria,
    /// resets to page 1 if a committed slot changed value, then fetches.
    /// If nothing is pending and the query is not dirty, returns without
    /// fetching.
    pub async fn settle(&mut self) -> &ListState {
        if self.disposed {
            return self.lifecycle.state();
        }

        if self.filter_debounce.is_pending() {
            self.filter_debounce.expired().await;
            if self.commit_filters() {
                self.paging.reset();
                self.dirty = true;
            }
        }
        if self.sort_debounce.is_pending() {
            self.sort_debounce.expired().await;
            if self.commit_sorts() {
                self.paging.reset();
                self.dirty = true;
            }
        }

        if self.dirty {
            self.dirty = false;
            self.run_query().await;
        }

        self.lifecycle.state()
    }

    /// Commit live filters; returns whether the committed value changed.
    fn commit_filters(&mut self) -> bool {
        let committed = sanitize_filters(&self.live_filters, &self.fields);
        let changed = committed != self.committed_filters;
        if changed {
            debug!(count = committed.len(), "filters committed");
            self.committed_filters = committed;
        }
        changed
    }

    /// Commit live sorts; returns whether the committed value changed.
    fn commit_sorts(&mut self) -> bool {
        let committed = sanitize_sorts(&self.live_sorts);
        let changed = committed != self.committed_sorts;
        if changed {
            debug!(count = committed.len(), "sorts committed");
            self.committed_sorts = committed;
        }
        changed
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.paging.limit(), self.paging.offset())
            .filters(self.committed_filters.iter().cloned())
            .sorts(self.committed_sorts.iter().cloned())
    }

    async fn run_query(&mut self) {
        let request = self.page_request();
        debug!(
            offset = request.offset,
            limit = request.limit,
            filters = request.filters.len(),
            "issuing main fetch"
        );
        let key = self.lifecycle.begin(&request);

        let result = self.fetcher.fetch_page(request).await;
        let outcome = self
            .lifecycle
            .main_settled(&key, result, self.should_probe.as_ref());

        if outcome == MainOutcome::NeedsProbe {
            debug!("main result empty, issuing existence probe");
            let result = self.fetcher.fetch_page(self.probe_request.clone()).await;
            self.lifecycle.probe_settled(&key, result);
        }

        debug!(state = ?self.lifecycle.state(), total = self.lifecycle.total(), "query settled");
    }
}
