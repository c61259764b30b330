//! # roster-query
//!
//! The criteria model for the Roster list-query engine.
//!
//! This crate provides the pure, I/O-free half of the engine:
//! - Data types and the operator registry (`operators_for`)
//! - Filter-field definitions with definition-time validation
//! - Filter and sort criteria, and their sanitization
//! - Page/limit bookkeeping
//! - The wire types exchanged with a fetch function
//!
//! ## Fields and criteria
//!
//! ```rust
//! use roster_query::{
//!     DataType, FieldSet, FilterCriterion, FilterField, FilterOperator, InputKind,
//!     sanitize_filters,
//! };
//!
//! let fields = FieldSet::new(vec![
//!     FilterField::new("email", "Email", InputKind::Text, DataType::Text)
//!         .operators([FilterOperator::Equals, FilterOperator::Contains]),
//! ])
//! .unwrap();
//!
//! let criteria = vec![
//!     FilterCriterion::new("email", FilterOperator::Contains, "@example.com"),
//!     // Incomplete entry: dropped by the sanitizer, not an error.
//!     FilterCriterion::new("email", FilterOperator::Equals, ""),
//! ];
//!
//! let committed = sanitize_filters(&criteria, &fields);
//! assert_eq!(committed.len(), 1);
//! ```
//!
//! ## Paging
//!
//! ```rust
//! use roster_query::Paging;
//!
//! let mut paging = Paging::new(20);
//! paging.set_page(3);
//! assert_eq!(paging.offset(), 40);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod criteria;
pub mod error;
pub mod field;
pub mod operator;
pub mod paging;
pub mod request;
pub mod sanitize;
pub mod value;

pub use criteria::{FilterCriterion, SortCriterion, SortDirection, SortOption};
pub use error::ConfigError;
pub use field::{ChoiceOption, FieldSet, FilterField, InputKind};
pub use operator::{operator_allowed, operators_for, DataType, FilterOperator};
pub use paging::{Paging, DEFAULT_LIMIT};
pub use request::{Page, PageRequest};
pub use sanitize::{sanitize_filters, sanitize_sorts};
pub use value::FilterValue;
