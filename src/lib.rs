//! # Roster
//!
//! A generic list-query engine for paginated admin views.
//!
//! Roster provides:
//! - A criteria model: typed filter fields, an operator registry, and
//!   sanitization of incomplete input
//! - Debounced live/committed criteria state
//! - Pagination bookkeeping with criteria-change resets
//! - A two-query "probe" protocol that tells a truly empty dataset apart
//!   from criteria that match nothing
//!
//! ## Quick Start
//!
//! ```rust
//! use roster::prelude::*;
//!
//! # async fn demo() -> Result<(), roster::ConfigError> {
//! let fields = FieldSet::new(vec![
//!     FilterField::new("email", "Email", InputKind::Text, DataType::Text)
//!         .operators([FilterOperator::Equals, FilterOperator::Contains]),
//! ])?;
//!
//! let mut query = ListQuery::builder(|_request: PageRequest| async move {
//!     // Talk to your API here.
//!     Ok::<_, FetchError>(Page::<String>::new(vec![], 0))
//! })
//! .fields(fields)
//! .limit(25)
//! .build();
//!
//! query.set_filters(vec![FilterCriterion::new(
//!     "email",
//!     FilterOperator::Contains,
//!     "@example.com",
//! )]);
//! query.settle().await;
//!
//! match query.state() {
//!     ListState::Populated => { /* render items */ }
//!     ListState::FilteredEmpty => { /* "no results, clear filters?" */ }
//!     ListState::TrueEmpty => { /* "create your first record" */ }
//!     _ => {}
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The pure criteria model: fields, operators, sanitization, paging.
pub mod query {
    pub use roster_query::*;
}

/// The asynchronous engine: debounce, lifecycle, orchestration.
pub mod engine {
    pub use roster_engine::*;
}

// Re-export key types at the crate root
pub use engine::{
    Debounce, FetchError, FetchResult, Fetcher, ListError, ListQuery, ListQueryBuilder, ListState,
    QueryLifecycle,
};
pub use query::{
    operators_for, sanitize_filters, sanitize_sorts, ChoiceOption, ConfigError, DataType, FieldSet,
    FilterCriterion, FilterField, FilterOperator, FilterValue, InputKind, Page, PageRequest, Paging,
    SortCriterion, SortDirection, SortOption,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{FetchError, Fetcher, ListQuery, ListState};
    pub use crate::query::{
        ChoiceOption, DataType, FieldSet, FilterCriterion, FilterField, FilterOperator,
        FilterValue, InputKind, Page, PageRequest, SortCriterion, SortDirection, SortOption,
    };
}
