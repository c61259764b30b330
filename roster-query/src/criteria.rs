//! Live filter and sort criteria.
//!
//! Criteria are the per-edit instances of a view's filter and sort state.
//! They are created and replaced wholesale on each user edit and are the
//! only form that, after sanitization, reaches the network layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operator::FilterOperator;
use crate::value::FilterValue;

/// One filter condition: field, operator, value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    /// Key of the field being filtered.
    pub field: String,
    /// The comparison to apply.
    pub operator: FilterOperator,
    /// The comparison value.
    pub value: FilterValue,
}

impl FilterCriterion {
    /// Create a new filter criterion.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl SortDirection {
    /// Get the wire name of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Asc
    }
}

/// A sortable-column definition offered to the user.
///
/// Definitions are supplied once per view and stay immutable for the view's
/// lifetime; [`SortCriterion`] instances are what the user actually picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    /// Key of the sortable field.
    pub key: String,
    /// Display label.
    pub label: String,
}

impl SortOption {
    /// Create a new sort option.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One applied sort: field key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    /// Key of the field to sort by.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortCriterion {
    /// Create a new sort criterion.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Sort ascending by a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Sort descending by a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}
