//! Query Evaluation Tests
//!
//! Tests for: single-field evaluation, multi-comparison intersection,
//! type-coerced comparison, group AND/OR folding, nested groups

use pretty_assertions::assert_eq;
use redcap_query::{
    Comparator, Comparison, ConfigurationError, Connector, Query, QueryError, QueryExpr,
    QueryGroup, Row,
};
use redcap_types::{CoercionError, FieldType};
use std::collections::BTreeSet;

// ============================================================================
// Test Helpers
// ============================================================================

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn ids(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn age_rows() -> Vec<Row> {
    vec![
        row(&[("record_id", "1"), ("age", "17")]),
        row(&[("record_id", "2"), ("age", "18")]),
        row(&[("record_id", "3"), ("age", "40")]),
        row(&[("record_id", "4"), ("age", "64")]),
        row(&[("record_id", "5"), ("age", "65")]),
    ]
}

fn text_type(_: &str) -> FieldType {
    FieldType::Text
}

// ============================================================================
// Single Query Evaluation
// ============================================================================

#[test]
fn test_eq_matches_single_row() {
    let rows = vec![
        row(&[("record_id", "1"), ("status", "active")]),
        row(&[("record_id", "2"), ("status", "withdrawn")]),
        row(&[("record_id", "3"), ("status", "screened")]),
    ];
    let query = Query::single("status", Comparator::Eq, "withdrawn");

    let matched = query.evaluate(&rows, "record_id", FieldType::Text).unwrap();
    assert_eq!(matched, ids(&["2"]));
}

#[test]
fn test_two_comparisons_intersect() {
    let query = Query::new(
        "age",
        vec![
            Comparison::new(Comparator::Ge, "18"),
            Comparison::new(Comparator::Lt, "65"),
        ],
    )
    .unwrap();

    let matched = query
        .evaluate(&age_rows(), "record_id", FieldType::Number)
        .unwrap();
    assert_eq!(matched, ids(&["2", "3", "4"]));
}

#[test]
fn test_empty_rows_yield_empty_set() {
    let query = Query::single("age", Comparator::Gt, "10");
    let matched = query.evaluate(&[], "record_id", FieldType::Number).unwrap();
    assert!(matched.is_empty());

    // Without rows there is nothing to coerce, so even an uncoercible
    // literal yields an empty set rather than an error.
    let query = Query::single("age", Comparator::Gt, "ten");
    let matched = query.evaluate(&[], "record_id", FieldType::Number).unwrap();
    assert!(matched.is_empty());
}

#[test]
fn test_duplicate_ids_collapse_into_set() {
    let rows = vec![
        row(&[("record_id", "1"), ("visit", "baseline")]),
        row(&[("record_id", "1"), ("visit", "baseline")]),
    ];
    let query = Query::single("visit", Comparator::Eq, "baseline");

    let matched = query.evaluate(&rows, "record_id", FieldType::Text).unwrap();
    assert_eq!(matched.len(), 1);
}

#[test]
fn test_ne_excludes_matching_rows() {
    let rows = vec![
        row(&[("record_id", "1"), ("status", "active")]),
        row(&[("record_id", "2"), ("status", "withdrawn")]),
    ];
    let query = Query::single("status", Comparator::Ne, "withdrawn");

    let matched = query.evaluate(&rows, "record_id", FieldType::Text).unwrap();
    assert_eq!(matched, ids(&["1"]));
}

// ============================================================================
// Type Coercion
// ============================================================================

#[test]
fn test_numeric_field_matches_across_scales() {
    let rows = vec![row(&[("record_id", "1"), ("dose", "5.0")])];
    let query = Query::single("dose", Comparator::Eq, "5");

    let matched = query.evaluate(&rows, "record_id", FieldType::Number).unwrap();
    assert_eq!(matched, ids(&["1"]));
}

#[test]
fn test_text_field_compares_strings_verbatim() {
    // Pinned asymmetry: the same comparison in string mode must not match.
    let rows = vec![row(&[("record_id", "1"), ("dose", "5.0")])];
    let query = Query::single("dose", Comparator::Eq, "5");

    let matched = query.evaluate(&rows, "record_id", FieldType::Text).unwrap();
    assert!(matched.is_empty());
}

#[test]
fn test_numeric_ordering_is_by_value() {
    // Lexicographically "9" > "10"; numerically it is not.
    let rows = vec![
        row(&[("record_id", "1"), ("count", "9")]),
        row(&[("record_id", "2"), ("count", "10")]),
    ];
    let query = Query::single("count", Comparator::Gt, "9");

    let matched = query
        .evaluate(&rows, "record_id", FieldType::Integer)
        .unwrap();
    assert_eq!(matched, ids(&["2"]));
}

#[test]
fn test_date_ordering() {
    let rows = vec![
        row(&[("record_id", "1"), ("enrolled", "2019-06-01")]),
        row(&[("record_id", "2"), ("enrolled", "2020-02-15")]),
        row(&[("record_id", "3"), ("enrolled", "2021-11-30")]),
    ];
    let query = Query::single("enrolled", Comparator::Ge, "2020-01-01");

    let matched = query
        .evaluate(&rows, "record_id", FieldType::DateYmd)
        .unwrap();
    assert_eq!(matched, ids(&["2", "3"]));
}

// ============================================================================
// Error Conditions
// ============================================================================

#[test]
fn test_empty_comparisons_rejected_at_construction() {
    let err = Query::new("age", vec![]).unwrap_err();
    assert!(matches!(
        err,
        QueryError::Configuration(ConfigurationError::EmptyComparisons { .. })
    ));
}

#[test]
fn test_email_field_rejected_for_any_comparator() {
    let rows = vec![row(&[("record_id", "1"), ("contact", "a@b.org")])];
    for comparator in [
        Comparator::Eq,
        Comparator::Ne,
        Comparator::Gt,
        Comparator::Ge,
        Comparator::Lt,
        Comparator::Le,
    ] {
        let query = Query::single("contact", comparator, "a@b.org");
        let err = query
            .evaluate(&rows, "record_id", FieldType::Email)
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::Configuration(ConfigurationError::EmailComparison { .. })
        ));
    }
}

#[test]
fn test_malformed_date_value_fails_evaluation() {
    let rows = vec![
        row(&[("record_id", "1"), ("enrolled", "2020-02-15")]),
        row(&[("record_id", "2"), ("enrolled", "15/02/2020")]),
    ];
    let query = Query::single("enrolled", Comparator::Ge, "2020-01-01");

    let err = query
        .evaluate(&rows, "record_id", FieldType::DateYmd)
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Coercion(CoercionError::MalformedDate { .. })
    ));
}

#[test]
fn test_non_numeric_literal_fails_evaluation() {
    let rows = vec![row(&[("record_id", "1"), ("age", "40")])];
    let query = Query::single("age", Comparator::Eq, "forty");

    let err = query
        .evaluate(&rows, "record_id", FieldType::Number)
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Coercion(CoercionError::NotNumeric { .. })
    ));
}

#[test]
fn test_malformed_row_fails_whole_evaluation() {
    // One bad row poisons the result; rows are never silently skipped.
    let rows = vec![
        row(&[("record_id", "1"), ("age", "40")]),
        row(&[("record_id", "2"), ("age", "n/a")]),
    ];
    let query = Query::single("age", Comparator::Gt, "10");

    assert!(query.evaluate(&rows, "record_id", FieldType::Number).is_err());
}

#[test]
fn test_missing_column_fails_evaluation() {
    let rows = vec![row(&[("record_id", "1")])];
    let query = Query::single("age", Comparator::Gt, "10");

    let err = query
        .evaluate(&rows, "record_id", FieldType::Number)
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Configuration(ConfigurationError::MissingColumn { .. })
    ));
}

// ============================================================================
// Group Evaluation - AND/OR folding
// ============================================================================

#[test]
fn test_group_or_unions_match_sets() {
    let rows = vec![
        row(&[("record_id", "1"), ("status", "active")]),
        row(&[("record_id", "2"), ("status", "withdrawn")]),
        row(&[("record_id", "3"), ("status", "screened")]),
    ];
    let mut group = QueryGroup::new(Query::single("status", Comparator::Eq, "active"));
    group.append(
        Query::single("status", Comparator::Eq, "withdrawn"),
        Connector::Or,
    );

    let matched = group.evaluate(&rows, "record_id", &text_type).unwrap();
    assert_eq!(matched, ids(&["1", "2"]));
}

#[test]
fn test_group_and_intersects_match_sets() {
    let rows = vec![
        row(&[("record_id", "1"), ("age", "30"), ("site", "boston")]),
        row(&[("record_id", "2"), ("age", "30"), ("site", "chicago")]),
        row(&[("record_id", "3"), ("age", "70"), ("site", "boston")]),
    ];
    let mut group = QueryGroup::new(Query::single("age", Comparator::Lt, "65"));
    group.append(
        Query::single("site", Comparator::Eq, "boston"),
        Connector::And,
    );

    let types = |field: &str| {
        if field == "age" {
            FieldType::Number
        } else {
            FieldType::Text
        }
    };
    let matched = group.evaluate(&rows, "record_id", &types).unwrap();
    assert_eq!(matched, ids(&["1"]));
}

#[test]
fn test_group_folds_left_to_right_without_precedence() {
    // a OR b AND c evaluates as (a OR b) AND c: no precedence between
    // connectors, only insertion order.
    let rows = vec![
        row(&[("record_id", "1"), ("x", "1"), ("y", "0")]),
        row(&[("record_id", "2"), ("x", "2"), ("y", "1")]),
        row(&[("record_id", "3"), ("x", "3"), ("y", "1")]),
    ];
    let mut group = QueryGroup::new(Query::single("x", Comparator::Eq, "1"));
    group.append(Query::single("x", Comparator::Eq, "2"), Connector::Or);
    group.append(Query::single("y", Comparator::Eq, "1"), Connector::And);

    let matched = group.evaluate(&rows, "record_id", &text_type).unwrap();
    assert_eq!(matched, ids(&["2"]));
}

#[test]
fn test_nested_group_evaluates_before_connector_applies() {
    // a AND (b OR c) keeps record 3 out even though it satisfies b.
    let rows = vec![
        row(&[("record_id", "1"), ("a", "1"), ("b", "1"), ("c", "0")]),
        row(&[("record_id", "2"), ("a", "1"), ("b", "0"), ("c", "1")]),
        row(&[("record_id", "3"), ("a", "0"), ("b", "1"), ("c", "1")]),
    ];
    let mut inner = QueryGroup::new(Query::single("b", Comparator::Eq, "1"));
    inner.append(Query::single("c", Comparator::Eq, "1"), Connector::Or);

    let mut outer = QueryGroup::new(Query::single("a", Comparator::Eq, "1"));
    outer.append(inner, Connector::And);

    let matched = outer.evaluate(&rows, "record_id", &text_type).unwrap();
    assert_eq!(matched, ids(&["1", "2"]));
}

#[test]
fn test_group_error_propagates_from_any_member() {
    let rows = vec![row(&[("record_id", "1"), ("a", "1"), ("n", "x")])];
    let mut group = QueryGroup::new(Query::single("a", Comparator::Eq, "1"));
    group.append(Query::single("n", Comparator::Gt, "0"), Connector::Or);

    let types = |field: &str| {
        if field == "n" {
            FieldType::Number
        } else {
            FieldType::Text
        }
    };
    assert!(group.evaluate(&rows, "record_id", &types).is_err());
}

// ============================================================================
// Group Structure
// ============================================================================

#[test]
fn test_members_iteration_is_restartable() {
    let mut group = QueryGroup::new(Query::single("a", Comparator::Eq, "1"));
    group.append(Query::single("b", Comparator::Eq, "2"), Connector::And);
    group.append(Query::single("c", Comparator::Eq, "3"), Connector::Or);

    assert_eq!(group.len(), 3);
    assert_eq!(group.members().count(), 3);
    // A second traversal starts over at the first member.
    let first_fields: Vec<_> = group.members().map(QueryExpr::fields).collect();
    assert_eq!(
        first_fields,
        vec![vec!["a"], vec!["b"], vec!["c"]]
    );
}

#[test]
fn test_expr_fields_deduplicates_recursively() {
    let mut inner = QueryGroup::new(Query::single("age", Comparator::Ge, "18"));
    inner.append(Query::single("site", Comparator::Eq, "boston"), Connector::Or);

    let mut outer = QueryGroup::new(Query::single("age", Comparator::Lt, "65"));
    outer.append(inner, Connector::And);

    let expr = QueryExpr::from(outer);
    assert_eq!(expr.fields(), vec!["age", "site"]);
}
