//! Criteria sanitization.
//!
//! Removal of incomplete or operator-invalid criteria before they reach the
//! network layer. An individual malformed criterion is dropped rather than
//! failing the whole query, so a partially-entered filter never blocks the
//! already-valid ones. Both functions are pure, order-preserving, and
//! idempotent.

use crate::criteria::{FilterCriterion, SortCriterion};
use crate::field::{FieldSet, FilterField};
use crate::operator::DataType;
use crate::value::FilterValue;

/// Drop incomplete or invalid filter criteria.
///
/// A criterion survives only if its field is defined, its operator is in
/// the field's operator set, and its value is non-empty and admissible for
/// the field's data type.
pub fn sanitize_filters(criteria: &[FilterCriterion], fields: &FieldSet) -> Vec<FilterCriterion> {
    criteria
        .iter()
        .filter(|criterion| {
            let Some(field) = fields.get(&criterion.field) else {
                return false;
            };
            field.allows(criterion.operator) && value_admissible(field, criterion)
        })
        .cloned()
        .collect()
}

/// Drop sort criteria missing a field key.
pub fn sanitize_sorts(criteria: &[SortCriterion]) -> Vec<SortCriterion> {
    criteria
        .iter()
        .filter(|criterion| !criterion.field.is_empty())
        .cloned()
        .collect()
}

fn value_admissible(field: &FilterField, criterion: &FilterCriterion) -> bool {
    let value = &criterion.value;
    if value.is_empty() {
        return false;
    }

    // List-taking operators need a list; everything below assumes the
    // operator's scalar form.
    if criterion.operator.takes_list() {
        return matches!(value, FilterValue::List(_));
    }

    match field.data_type {
        DataType::Date => match value {
            FilterValue::Range { from, to } => {
                bound_is_date(from.as_deref()) && bound_is_date(to.as_deref())
            }
            other => other.is_date(),
        },
        DataType::Number => value.is_number(),
        DataType::Boolean => matches!(value, FilterValue::Bool(_)),
        DataType::Text | DataType::List => true,
    }
}

fn bound_is_date(bound: Option<&FilterValue>) -> bool {
    match bound {
        None => true,
        Some(value) if value.is_empty() => true,
        Some(value) => value.is_date(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FilterField, InputKind};
    use crate::operator::FilterOperator;
    use pretty_assertions::assert_eq;

    fn fields() -> FieldSet {
        FieldSet::new(vec![
            FilterField::new("name", "Name", InputKind::Text, DataType::Text)
                .operators([FilterOperator::Equals, FilterOperator::Contains]),
            FilterField::new("status", "Status", InputKind::MultiSelect, DataType::List)
                .operators([FilterOperator::IsAnyOf, FilterOperator::IsNotAnyOf]),
            FilterField::new("amount", "Amount", InputKind::Number, DataType::Number)
                .operators([FilterOperator::Gte, FilterOperator::Lte]),
            FilterField::new("created_at", "Created", InputKind::DatePicker, DataType::Date)
                .operators([FilterOperator::Before, FilterOperator::Between]),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_criteria_survive_in_order() {
        let criteria = vec![
            FilterCriterion::new("status", FilterOperator::IsAnyOf, vec!["active"]),
            FilterCriterion::new("name", FilterOperator::Contains, "acme"),
            FilterCriterion::new("amount", FilterOperator::Gte, 100i64),
        ];

        let sanitized = sanitize_filters(&criteria, &fields());
        assert_eq!(sanitized, criteria);
    }

    #[test]
    fn test_empty_values_dropped() {
        let criteria = vec![
            FilterCriterion::new("name", FilterOperator::Contains, ""),
            FilterCriterion::new("name", FilterOperator::Equals, FilterValue::Null),
            FilterCriterion::new("status", FilterOperator::IsAnyOf, Vec::<String>::new()),
            FilterCriterion::new("name", FilterOperator::Contains, "kept"),
        ];

        let sanitized = sanitize_filters(&criteria, &fields());
        assert_eq!(
            sanitized,
            vec![FilterCriterion::new("name", FilterOperator::Contains, "kept")]
        );
    }

    #[test]
    fn test_unknown_field_dropped() {
        let criteria = vec![FilterCriterion::new("ghost", FilterOperator::Equals, "x")];
        assert!(sanitize_filters(&criteria, &fields()).is_empty());
    }

    #[test]
    fn test_disallowed_operator_dropped() {
        // `starts_with` is registry-legal for text but this field does not offer it.
        let criteria = vec![FilterCriterion::new(
            "name",
            FilterOperator::StartsWith,
            "ac",
        )];
        assert!(sanitize_filters(&criteria, &fields()).is_empty());
    }

    #[test]
    fn test_list_operator_requires_list_value() {
        let criteria = vec![FilterCriterion::new(
            "status",
            FilterOperator::IsAnyOf,
            "active",
        )];
        assert!(sanitize_filters(&criteria, &fields()).is_empty());
    }

    #[test]
    fn test_invalid_date_dropped() {
        let criteria = vec![
            FilterCriterion::new("created_at", FilterOperator::Before, "soon"),
            FilterCriterion::new("created_at", FilterOperator::Before, "2024-06-01"),
        ];

        let sanitized = sanitize_filters(&criteria, &fields());
        assert_eq!(
            sanitized,
            vec![FilterCriterion::new(
                "created_at",
                FilterOperator::Before,
                "2024-06-01"
            )]
        );
    }

    #[test]
    fn test_date_range_with_open_bound_survives() {
        let open = FilterCriterion::new(
            "created_at",
            FilterOperator::Between,
            FilterValue::Range {
                from: Some(Box::new("2024-01-01".into())),
                to: None,
            },
        );
        let bad = FilterCriterion::new(
            "created_at",
            FilterOperator::Between,
            FilterValue::range("start", "end"),
        );

        let sanitized = sanitize_filters(&[open.clone(), bad], &fields());
        assert_eq!(sanitized, vec![open]);
    }

    #[test]
    fn test_non_numeric_amount_dropped() {
        let criteria = vec![FilterCriterion::new("amount", FilterOperator::Gte, "100")];
        assert!(sanitize_filters(&criteria, &fields()).is_empty());
    }

    #[test]
    fn test_sanitize_filters_idempotent() {
        let criteria = vec![
            FilterCriterion::new("name", FilterOperator::Contains, "acme"),
            FilterCriterion::new("name", FilterOperator::Contains, ""),
            FilterCriterion::new("amount", FilterOperator::Lte, 5i64),
        ];

        let once = sanitize_filters(&criteria, &fields());
        let twice = sanitize_filters(&once, &fields());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sanitize_sorts() {
        let criteria = vec![
            SortCriterion::desc("created_at"),
            SortCriterion::asc(""),
            SortCriterion::asc("name"),
        ];

        let sanitized = sanitize_sorts(&criteria);
        assert_eq!(
            sanitized,
            vec![SortCriterion::desc("created_at"), SortCriterion::asc("name")]
        );
        assert_eq!(sanitize_sorts(&sanitized), sanitized);
    }

    #[test]
    fn test_empty_field_set_drops_everything() {
        let criteria = vec![FilterCriterion::new("name", FilterOperator::Equals, "x")];
        assert!(sanitize_filters(&criteria, &FieldSet::empty()).is_empty());
    }
}
