//! The query lifecycle state machine.
//!
//! One [`QueryLifecycle`] tracks a single view's query cycle as a sequence
//! of named events consumed in deterministic order: [`QueryLifecycle::begin`]
//! when a fetch is issued, [`QueryLifecycle::main_settled`] when the main
//! result arrives, [`QueryLifecycle::probe_settled`] when the conditional
//! existence probe arrives. Each event carries the [`RequestKey`] of the
//! fetch it belongs to; an event whose key no longer matches the current key
//! is discarded, which is how out-of-order responses are cancelled without
//! network-level cancellation.
//!
//! A zero-result page under active filters is ambiguous: the dataset may be
//! empty, or the criteria may match nothing. The probe (a minimal,
//! filter-free request) disambiguates. A failed probe on an empty main
//! result is surfaced as an error rather than guessed either way.

use thiserror::Error;

use roster_query::{Page, PageRequest};

use crate::fetch::{FetchError, FetchResult};

/// Errors surfaced through [`ListState::Error`].
#[derive(Debug, Error)]
pub enum ListError {
    /// The main query failed.
    #[error("list query failed")]
    Fetch {
        /// The fetcher's error.
        #[source]
        source: FetchError,
    },

    /// The main query returned nothing and the existence probe failed,
    /// leaving the empty state unclassifiable.
    #[error("list query returned no items and the existence probe failed")]
    AmbiguousEmpty {
        /// The probe's error.
        #[source]
        source: FetchError,
    },
}

impl ListError {
    /// Whether the error came from the probe rather than the main query.
    pub fn is_ambiguous_empty(&self) -> bool {
        matches!(self, Self::AmbiguousEmpty { .. })
    }
}

/// Where a view's query cycle currently stands.
#[derive(Debug, Default)]
pub enum ListState {
    /// A fetch is outstanding (or none has been issued yet).
    #[default]
    Loading,
    /// The query cycle failed; see the error for which request.
    Error(ListError),
    /// The resource holds no records at all.
    TrueEmpty,
    /// Records exist, but the current criteria match none of them.
    FilteredEmpty,
    /// The current page has items.
    Populated,
}

impl ListState {
    /// Whether a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the cycle settled in an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Identity of one issued fetch.
///
/// Combines the canonical serialized request with a generation counter that
/// is bumped on teardown, so responses from a disposed cycle can never be
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestKey {
    generation: u64,
    identity: String,
}

impl RequestKey {
    fn new(generation: u64, request: &PageRequest) -> Self {
        Self {
            generation,
            identity: request.identity(),
        }
    }
}

/// What the orchestrator should do after the main result settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainOutcome {
    /// The cycle is resolved; no probe is needed.
    Resolved,
    /// The probe predicate asked for an existence check.
    NeedsProbe,
    /// The result belonged to a superseded request and was discarded.
    Stale,
}

/// State machine over one view's query lifecycle.
#[derive(Debug)]
pub struct QueryLifecycle<T> {
    generation: u64,
    key: Option<RequestKey>,
    state: ListState,
    items: Vec<T>,
    total: u64,
    main_was_empty: bool,
}

impl<T> QueryLifecycle<T> {
    /// Create a lifecycle in the initial `Loading` state.
    pub fn new() -> Self {
        Self {
            generation: 0,
            key: None,
            state: ListState::Loading,
            items: Vec::new(),
            total: 0,
            main_was_empty: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Items from the most recently applied main result.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total record count from the most recently applied main result.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Start a new query cycle for the given request.
    ///
    /// Supersedes any in-flight cycle: its responses will no longer match
    /// the current key and will be discarded on arrival.
    pub fn begin(&mut self, request: &PageRequest) -> RequestKey {
        let key = RequestKey::new(self.generation, request);
        self.key = Some(key.clone());
        self.state = ListState::Loading;
        key
    }

    /// Apply the main result for the cycle identified by `key`.
    ///
    /// `needs_probe` is consulted on success to decide whether an existence
    /// probe must run before the cycle can resolve.
    pub fn main_settled(
        &mut self,
        key: &RequestKey,
        result: FetchResult<T>,
        needs_probe: impl FnOnce(&Page<T>) -> bool,
    ) -> MainOutcome {
        if self.key.as_ref() != Some(key) {
            return MainOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.main_was_empty = page.is_empty();
                let probe = needs_probe(&page);
                self.total = page.total;
                self.items = page.items;
                if probe {
                    MainOutcome::NeedsProbe
                } else {
                    self.state = ListState::Populated;
                    MainOutcome::Resolved
                }
            }
            Err(source) => {
                self.items.clear();
                self.total = 0;
                self.state = ListState::Error(ListError::Fetch { source });
                MainOutcome::Resolved
            }
        }
    }

    /// Apply the probe result for the cycle identified by `key`.
    ///
    /// Resolution: an empty main result classifies as `TrueEmpty` when the
    /// probe found nothing, `FilteredEmpty` when it found something, and
    /// `Error` when the probe itself failed. A non-empty main result stays
    /// `Populated` regardless of the probe (a probe cannot downgrade a page
    /// that has items).
    pub fn probe_settled(&mut self, key: &RequestKey, result: FetchResult<T>) {
        if self.key.as_ref() != Some(key) {
            return;
        }

        if !self.main_was_empty {
            self.state = ListState::Populated;
            return;
        }

        self.state = match result {
            Ok(page) if page.is_empty() => ListState::TrueEmpty,
            Ok(_) => ListState::FilteredEmpty,
            Err(source) => ListState::Error(ListError::AmbiguousEmpty { source }),
        };
    }

    /// Invalidate the current cycle.
    ///
    /// Bumps the generation so any in-flight response, even one for an
    /// identical request, can no longer be applied. Used on teardown.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.key = None;
    }
}

impl<T> Default for QueryLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_if_empty<T>(page: &Page<T>) -> bool {
        page.is_empty()
    }

    fn request() -> PageRequest {
        PageRequest::new(20, 0)
    }

    #[test]
    fn test_initial_state_is_loading() {
        let lifecycle: QueryLifecycle<String> = QueryLifecycle::new();
        assert!(lifecycle.state().is_loading());
        assert!(lifecycle.items().is_empty());
    }

    #[test]
    fn test_populated_without_probe() {
        let mut lifecycle = QueryLifecycle::new();
        let key = lifecycle.begin(&request());

        let outcome = lifecycle.main_settled(
            &key,
            Ok(Page::new(vec!["a".to_string()], 1)),
            probe_if_empty,
        );

        assert_eq!(outcome, MainOutcome::Resolved);
        assert!(matches!(lifecycle.state(), ListState::Populated));
        assert_eq!(lifecycle.items(), ["a".to_string()]);
        assert_eq!(lifecycle.total(), 1);
    }

    #[test]
    fn test_true_empty() {
        let mut lifecycle: QueryLifecycle<String> = QueryLifecycle::new();
        let key = lifecycle.begin(&request());

        let outcome = lifecycle.main_settled(&key, Ok(Page::empty()), probe_if_empty);
        assert_eq!(outcome, MainOutcome::NeedsProbe);
        assert!(lifecycle.state().is_loading());

        lifecycle.probe_settled(&key, Ok(Page::empty()));
        assert!(matches!(lifecycle.state(), ListState::TrueEmpty));
    }

    #[test]
    fn test_filtered_empty() {
        let mut lifecycle = QueryLifecycle::new();
        let key = lifecycle.begin(&request());

        lifecycle.main_settled(&key, Ok(Page::empty()), probe_if_empty);
        lifecycle.probe_settled(&key, Ok(Page::new(vec!["x".to_string()], 41)));

        assert!(matches!(lifecycle.state(), ListState::FilteredEmpty));
        // The view's page stays empty; the probe result is classification only.
        assert!(lifecycle.items().is_empty());
    }

    #[test]
    fn test_main_failure_is_error() {
        let mut lifecycle: QueryLifecycle<String> = QueryLifecycle::new();
        let key = lifecycle.begin(&request());

        let outcome =
            lifecycle.main_settled(&key, Err(FetchError::from("boom")), probe_if_empty);

        assert_eq!(outcome, MainOutcome::Resolved);
        match lifecycle.state() {
            ListState::Error(err) => assert!(!err.is_ambiguous_empty()),
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[test]
    fn test_probe_failure_on_empty_main_is_error() {
        let mut lifecycle: QueryLifecycle<String> = QueryLifecycle::new();
        let key = lifecycle.begin(&request());

        lifecycle.main_settled(&key, Ok(Page::empty()), probe_if_empty);
        lifecycle.probe_settled(&key, Err(FetchError::from("probe down")));

        match lifecycle.state() {
            ListState::Error(err) => assert!(err.is_ambiguous_empty()),
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[test]
    fn test_probe_cannot_downgrade_populated_page() {
        let mut lifecycle = QueryLifecycle::new();
        let key = lifecycle.begin(&request());

        // A caller-supplied predicate may probe even when items exist.
        lifecycle.main_settled(&key, Ok(Page::new(vec![1u64], 1)), |_| true);
        lifecycle.probe_settled(&key, Err(FetchError::from("probe down")));

        assert!(matches!(lifecycle.state(), ListState::Populated));
    }

    #[test]
    fn test_stale_main_discarded() {
        let mut lifecycle = QueryLifecycle::new();
        let old_key = lifecycle.begin(&request());
        let new_key = lifecycle.begin(&PageRequest::new(20, 20));

        let outcome = lifecycle.main_settled(
            &old_key,
            Ok(Page::new(vec!["stale".to_string()], 99)),
            probe_if_empty,
        );

        assert_eq!(outcome, MainOutcome::Stale);
        assert!(lifecycle.state().is_loading());
        assert!(lifecycle.items().is_empty());

        lifecycle.main_settled(&new_key, Ok(Page::new(vec!["fresh".to_string()], 1)), probe_if_empty);
        assert_eq!(lifecycle.items(), ["fresh".to_string()]);
    }

    #[test]
    fn test_stale_probe_discarded() {
        let mut lifecycle: QueryLifecycle<String> = QueryLifecycle::new();
        let old_key = lifecycle.begin(&request());
        lifecycle.main_settled(&old_key, Ok(Page::empty()), probe_if_empty);

        let new_key = lifecycle.begin(&PageRequest::new(20, 20));
        lifecycle.probe_settled(&old_key, Ok(Page::empty()));

        // The probe belonged to the superseded cycle.
        assert!(lifecycle.state().is_loading());

        lifecycle.main_settled(&new_key, Ok(Page::new(vec!["a".to_string()], 1)), probe_if_empty);
        assert!(matches!(lifecycle.state(), ListState::Populated));
    }

    #[test]
    fn test_invalidate_blocks_identical_request() {
        let mut lifecycle: QueryLifecycle<String> = QueryLifecycle::new();
        let key = lifecycle.begin(&request());
        lifecycle.invalidate();

        let outcome = lifecycle.main_settled(&key, Ok(Page::empty()), probe_if_empty);
        assert_eq!(outcome, MainOutcome::Stale);
    }

    #[test]
    fn test_new_cycle_returns_to_loading() {
        let mut lifecycle = QueryLifecycle::new();
        let key = lifecycle.begin(&request());
        lifecycle.main_settled(&key, Ok(Page::new(vec![1u8], 1)), probe_if_empty);
        assert!(matches!(lifecycle.state(), ListState::Populated));

        lifecycle.begin(&PageRequest::new(20, 20));
        assert!(lifecycle.state().is_loading());
    }
}
