//! # roster-engine
//!
//! Debounced, probe-aware query orchestration for paginated list views.
//!
//! This crate provides the asynchronous half of the Roster list-query
//! engine:
//! - A caller-supplied [`Fetcher`] contract (plain async closures qualify)
//! - Cancel-then-restart [`Debounce`] timers for criteria edits
//! - A [`QueryLifecycle`] state machine that classifies zero-result pages
//!   as truly empty or merely filtered-empty via a conditional existence
//!   probe, and discards out-of-order responses by request key
//! - The [`ListQuery`] orchestrator tying it all to one view
//!
//! ## Flow
//!
//! A user edit updates live criteria synchronously and schedules a commit.
//! After the quiet window, the sanitized criteria are committed, pagination
//! returns to page 1, and the main fetch is issued with the new offset. If
//! the main result is empty, a minimal filter-free probe classifies the
//! empty state: no records at all (`TrueEmpty`) or none matching the
//! criteria (`FilteredEmpty`). A failed probe on an empty main result is
//! surfaced as an error, never guessed.
//!
//! ```rust
//! use roster_engine::{fetch::FetchError, query::ListQuery, lifecycle::ListState};
//! use roster_query::{Page, PageRequest};
//!
//! # async fn demo() {
//! let mut query = ListQuery::builder(|_request: PageRequest| async move {
//!     Ok::<_, FetchError>(Page::<String>::empty())
//! })
//! .build();
//!
//! query.settle().await;
//! assert!(matches!(query.state(), ListState::TrueEmpty));
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod debounce;
pub mod fetch;
pub mod lifecycle;
pub mod logging;
pub mod query;

pub use debounce::{Debounce, DEFAULT_DEBOUNCE};
pub use fetch::{FetchError, FetchResult, Fetcher};
pub use lifecycle::{ListError, ListState, MainOutcome, QueryLifecycle, RequestKey};
pub use query::{ListQuery, ListQueryBuilder, ProbePredicate};
