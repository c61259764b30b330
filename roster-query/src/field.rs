//! Filter-field definitions and their validation.
//!
//! A view declares its filterable fields once, up front. Each definition
//! names the input widget to render, the data type, and the subset of
//! registry operators it offers. Definitions are validated when the
//! [`FieldSet`] is built; a field listing an operator the registry does not
//! permit for its data type is a programmer error, surfaced as a
//! [`ConfigError`] before any query runs.
//!
//! ```rust
//! use roster_query::field::{FieldSet, FilterField, InputKind};
//! use roster_query::operator::{DataType, FilterOperator};
//!
//! let fields = FieldSet::new(vec![
//!     FilterField::new("name", "Name", InputKind::Text, DataType::Text)
//!         .operators([FilterOperator::Equals, FilterOperator::Contains]),
//!     FilterField::new("status", "Status", InputKind::Select, DataType::Text)
//!         .operators([FilterOperator::Equals, FilterOperator::IsAnyOf])
//!         .options([("active", "Active"), ("terminated", "Terminated")]),
//! ])
//! .unwrap();
//!
//! assert!(fields.get("status").is_some());
//! ```

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::ConfigError;
use crate::operator::{operators_for, DataType, FilterOperator};

/// The input widget a filter field renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Free-form text input.
    Text,
    /// Single-choice dropdown.
    Select,
    /// Multi-choice dropdown.
    MultiSelect,
    /// Date picker.
    DatePicker,
    /// Numeric input.
    Number,
}

/// One selectable choice for a choice-based widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// The value sent on the wire.
    pub value: String,
    /// The label shown to the user.
    pub label: String,
}

impl ChoiceOption {
    /// Create a new choice option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for ChoiceOption {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

/// Definition of one filterable field in a view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    /// Key of the field, as sent on the wire.
    pub key: String,
    /// Display label.
    pub label: String,
    /// The input widget to render.
    pub input: InputKind,
    /// The data type, which bounds the legal operators.
    pub data_type: DataType,
    /// The operators this field offers; a subsequence of the registry's
    /// set for `data_type`.
    pub operators: SmallVec<[FilterOperator; 8]>,
    /// Choices for choice-based widgets.
    pub options: Vec<ChoiceOption>,
}

impl FilterField {
    /// Create a new field definition with no operators yet.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        input: InputKind,
        data_type: DataType,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            input,
            data_type,
            operators: SmallVec::new(),
            options: Vec::new(),
        }
    }

    /// Set the operators this field offers.
    pub fn operators(mut self, operators: impl IntoIterator<Item = FilterOperator>) -> Self {
        self.operators = operators.into_iter().collect();
        self
    }

    /// Set the choices for choice-based widgets.
    pub fn options(mut self, options: impl IntoIterator<Item = impl Into<ChoiceOption>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether this field offers the given operator.
    pub fn allows(&self, operator: FilterOperator) -> bool {
        self.operators.contains(&operator)
    }

    /// Validate this definition against the operator registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::EmptyFieldKey);
        }
        let legal = operators_for(self.data_type)?;
        for &operator in &self.operators {
            if !legal.contains(&operator) {
                return Err(ConfigError::OperatorNotAllowed {
                    field: self.key.clone(),
                    operator,
                    data_type: self.data_type,
                });
            }
        }
        Ok(())
    }
}

/// The validated set of filter fields for one view.
///
/// Built once per view from the caller's definitions and immutable for the
/// view's lifetime. Lookup is by field key, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: IndexMap<String, FilterField>,
}

impl FieldSet {
    /// Build a field set, validating every definition.
    pub fn new(fields: impl IntoIterator<Item = FilterField>) -> Result<Self, ConfigError> {
        let mut map = IndexMap::new();
        for field in fields {
            field.validate()?;
            let key = field.key.clone();
            if map.insert(key.clone(), field).is_some() {
                return Err(ConfigError::DuplicateField { field: key });
            }
        }
        Ok(Self { fields: map })
    }

    /// An empty field set; every criterion sanitizes away against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a field definition by key.
    pub fn get(&self, key: &str) -> Option<&FilterField> {
        self.fields.get(key)
    }

    /// Iterate over the definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterField> {
        self.fields.values()
    }

    /// Number of fields in the set.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(key: &str) -> FilterField {
        FilterField::new(key, key.to_uppercase(), InputKind::Text, DataType::Text)
            .operators([FilterOperator::Equals, FilterOperator::Contains])
    }

    #[test]
    fn test_field_validate_ok() {
        assert_eq!(text_field("name").validate(), Ok(()));
    }

    #[test]
    fn test_listed_operators_are_registry_subset() {
        let field = FilterField::new(
            "status",
            "Status",
            InputKind::MultiSelect,
            DataType::List,
        )
        .operators([FilterOperator::IsAnyOf, FilterOperator::IsNotAnyOf]);

        let legal = operators_for(field.data_type).unwrap();
        assert!(field.operators.iter().all(|op| legal.contains(op)));
        assert_eq!(field.validate(), Ok(()));
    }

    #[test]
    fn test_operator_not_allowed_is_config_error() {
        let field = FilterField::new("paid", "Paid", InputKind::Select, DataType::Boolean)
            .operators([FilterOperator::Contains]);

        assert_eq!(
            field.validate(),
            Err(ConfigError::OperatorNotAllowed {
                field: "paid".to_string(),
                operator: FilterOperator::Contains,
                data_type: DataType::Boolean,
            })
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let field = FilterField::new("", "Blank", InputKind::Text, DataType::Text);
        assert_eq!(field.validate(), Err(ConfigError::EmptyFieldKey));
    }

    #[test]
    fn test_field_set_rejects_duplicates() {
        let result = FieldSet::new(vec![text_field("name"), text_field("name")]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateField {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_field_set_rejects_invalid_field() {
        let bad = FilterField::new("age", "Age", InputKind::Number, DataType::Number)
            .operators([FilterOperator::StartsWith]);
        assert!(FieldSet::new(vec![text_field("name"), bad]).is_err());
    }

    #[test]
    fn test_field_set_lookup_and_order() {
        let fields = FieldSet::new(vec![text_field("b"), text_field("a")]).unwrap();
        assert!(fields.get("a").is_some());
        assert!(fields.get("missing").is_none());

        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_options_from_tuples() {
        let field = FilterField::new("status", "Status", InputKind::Select, DataType::Text)
            .operators([FilterOperator::Equals])
            .options([("active", "Active"), ("pending", "Pending")]);

        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[0], ChoiceOption::new("active", "Active"));
    }
}
