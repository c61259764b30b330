//! Data types, comparison operators, and the operator registry.
//!
//! Every filterable field declares a [`DataType`], and the registry maps each
//! data type to the ordered set of [`FilterOperator`]s that are legal for it.
//! The registry is fixed configuration-time data: it is built once on first
//! access and never changes afterwards.
//!
//! ```rust
//! use roster_query::operator::{operators_for, DataType, FilterOperator};
//!
//! let ops = operators_for(DataType::Text).unwrap();
//! assert_eq!(ops[0], FilterOperator::Equals);
//! assert!(ops.contains(&FilterOperator::Contains));
//! ```

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The shape of the data a filterable field holds.
///
/// Determines which operators are legal for the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Free-form text.
    Text,
    /// Integer or floating-point number.
    Number,
    /// ISO-8601 date or datetime.
    Date,
    /// True/false flag.
    Boolean,
    /// A list of values (tags, statuses, ...).
    List,
}

impl DataType {
    /// Get the wire name of this data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::List => "list",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comparison kind applied by a filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Equals the value.
    Equals,
    /// Does not equal the value.
    NotEquals,
    /// Contains the value (substring or list membership).
    Contains,
    /// Does not contain the value.
    NotContains,
    /// Starts with the value.
    StartsWith,
    /// Ends with the value.
    EndsWith,
    /// Matches any of the listed values.
    IsAnyOf,
    /// Matches none of the listed values.
    IsNotAnyOf,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Strictly before the date.
    Before,
    /// Strictly after the date.
    After,
    /// Within the date range.
    Between,
}

impl FilterOperator {
    /// Get the wire name of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::IsAnyOf => "is_any_of",
            Self::IsNotAnyOf => "is_not_any_of",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Before => "before",
            Self::After => "after",
            Self::Between => "between",
        }
    }

    /// Whether this operator compares against a list of values.
    pub fn takes_list(&self) -> bool {
        matches!(self, Self::IsAnyOf | Self::IsNotAnyOf)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static REGISTRY: OnceLock<IndexMap<DataType, &'static [FilterOperator]>> = OnceLock::new();

fn registry() -> &'static IndexMap<DataType, &'static [FilterOperator]> {
    use FilterOperator::*;

    REGISTRY.get_or_init(|| {
        IndexMap::from([
            (
                DataType::Text,
                &[
                    Equals, NotEquals, Contains, NotContains, StartsWith, EndsWith, IsAnyOf,
                    IsNotAnyOf,
                ][..],
            ),
            (DataType::Number, &[Equals, NotEquals, Gt, Gte, Lt, Lte][..]),
            (DataType::Date, &[Equals, Before, After, Between][..]),
            (DataType::Boolean, &[Equals, NotEquals][..]),
            (DataType::List, &[Contains, IsAnyOf, IsNotAnyOf][..]),
        ])
    })
}

/// Get the ordered sequence of operators legal for a data type.
///
/// Fails with [`ConfigError::UnregisteredDataType`] if the data type has no
/// registered entry. Intended for field-definition time, not per-request use.
pub fn operators_for(data_type: DataType) -> Result<&'static [FilterOperator], ConfigError> {
    registry()
        .get(&data_type)
        .copied()
        .ok_or(ConfigError::UnregisteredDataType { data_type })
}

/// Check whether an operator is legal for a data type.
pub fn operator_allowed(data_type: DataType, operator: FilterOperator) -> bool {
    operators_for(data_type).is_ok_and(|ops| ops.contains(&operator))
}
