//! Filter values carried by criteria.

use serde::{Deserialize, Serialize};

/// A filter value that can be used in comparisons.
///
/// The shape depends on the field's data type: scalars for text and number
/// fields, ISO-8601 strings or ranges for date fields, lists for any-of
/// operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
    /// List of values.
    List(Vec<FilterValue>),
    /// Inclusive range, used by date `between` filters.
    Range {
        /// Lower bound, if any.
        #[serde(default)]
        from: Option<Box<FilterValue>>,
        /// Upper bound, if any.
        #[serde(default)]
        to: Option<Box<FilterValue>>,
    },
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this value carries no usable content.
    ///
    /// Null, the empty string, an empty list, and a range with neither bound
    /// are all empty. A partially-entered filter produces such values; the
    /// sanitizer drops them.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::List(values) => values.is_empty(),
            Self::Range { from, to } => {
                from.as_deref().is_none_or(FilterValue::is_empty)
                    && to.as_deref().is_none_or(FilterValue::is_empty)
            }
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// Check if this value parses as an ISO-8601 date or datetime.
    ///
    /// Accepts RFC 3339 datetimes (`2024-01-01T00:00:00Z`) and plain dates
    /// (`2024-01-01`). Non-string values are not dates.
    pub fn is_date(&self) -> bool {
        match self {
            Self::String(s) => {
                chrono::DateTime::parse_from_rfc3339(s).is_ok()
                    || s.parse::<chrono::NaiveDate>().is_ok()
            }
            _ => false,
        }
    }

    /// Check if this value is numeric.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Build an inclusive range value.
    pub fn range(from: impl Into<FilterValue>, to: impl Into<FilterValue>) -> Self {
        Self::Range {
            from: Some(Box::new(from.into())),
            to: Some(Box::new(to.into())),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}
