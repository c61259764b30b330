//! Configuration errors raised at field-definition time.
//!
//! These are programmer errors: a view declared a filter field whose
//! configuration is inconsistent with the operator registry. They are raised
//! when the definitions are built, never while a query is running.

use thiserror::Error;

use crate::operator::{DataType, FilterOperator};

/// Errors produced while validating filter-field configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The operator registry has no entry for a data type.
    #[error("no operators registered for data type `{data_type}`")]
    UnregisteredDataType {
        /// The data type missing from the registry.
        data_type: DataType,
    },

    /// A field lists an operator the registry does not permit for its type.
    #[error("operator `{operator}` is not permitted for `{field}` (data type `{data_type}`)")]
    OperatorNotAllowed {
        /// The offending field key.
        field: String,
        /// The operator the field listed.
        operator: FilterOperator,
        /// The field's declared data type.
        data_type: DataType,
    },

    /// Two fields in one view share the same key.
    #[error("duplicate filter field key `{field}`")]
    DuplicateField {
        /// The repeated field key.
        field: String,
    },

    /// A field was declared with an empty key.
    #[error("filter field with empty key")]
    EmptyFieldKey,
}
