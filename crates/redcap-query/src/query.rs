//! Single-field queries

use crate::Row;
use crate::comparator::Comparator;
use crate::error::{ConfigurationError, QueryResult};
use redcap_types::{FieldType, ValueCoercer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One comparator/literal pair.
///
/// The literal stays raw until evaluation, when it is coerced with the
/// field's declared type alongside the row values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Relational verb
    pub comparator: Comparator,
    /// Raw comparison literal
    pub value: String,
}

impl Comparison {
    /// Create a new comparison
    pub fn new(comparator: Comparator, value: impl Into<String>) -> Self {
        Self {
            comparator,
            value: value.into(),
        }
    }
}

/// A single field's AND-combined list of comparisons.
///
/// Immutable once constructed; a query always carries at least one
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    field: String,
    comparisons: Vec<Comparison>,
}

impl Query {
    /// Create a query over one field.
    ///
    /// Fails with [`ConfigurationError::EmptyComparisons`] if `comparisons`
    /// is empty.
    pub fn new(field: impl Into<String>, comparisons: Vec<Comparison>) -> QueryResult<Self> {
        let field = field.into();
        if comparisons.is_empty() {
            return Err(ConfigurationError::EmptyComparisons { field }.into());
        }
        Ok(Self { field, comparisons })
    }

    /// Shorthand for a query with a single comparison
    pub fn single(
        field: impl Into<String>,
        comparator: Comparator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            comparisons: vec![Comparison::new(comparator, value)],
        }
    }

    /// The field this query tests
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The ordered comparisons, all of which must hold
    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    /// Render for diagnostics: `"<field> <verb>:<value> AND <verb>:<value>"`
    pub fn render(&self) -> String {
        let comparisons: Vec<String> = self
            .comparisons
            .iter()
            .map(|c| format!("{}:{}", c.comparator, c.value))
            .collect();
        format!("{} {}", self.field, comparisons.join(" AND "))
    }

    /// Evaluate against exported rows, returning the matching record ids.
    ///
    /// Each comparison's match set is computed independently and the
    /// intersection of all sets returned. The same coercer converts the
    /// literal and every row value, so numeric and date fields compare by
    /// value rather than by string. An empty row sequence yields an empty
    /// set; a value that fails coercion fails the whole evaluation.
    pub fn evaluate(
        &self,
        rows: &[Row],
        id_field: &str,
        field_type: FieldType,
    ) -> QueryResult<BTreeSet<String>> {
        if field_type == FieldType::Email {
            return Err(ConfigurationError::EmailComparison {
                field: self.field.clone(),
            }
            .into());
        }
        if rows.is_empty() {
            return Ok(BTreeSet::new());
        }
        let coercer = ValueCoercer::new(&self.field, field_type);

        let mut matched: Option<BTreeSet<String>> = None;
        for comparison in &self.comparisons {
            let literal = coercer.coerce(&comparison.value)?;
            let mut hits = BTreeSet::new();
            for row in rows {
                let id = row_value(row, id_field)?;
                let value = coercer.coerce(row_value(row, &self.field)?)?;
                if comparison.comparator.holds(value.cmp(&literal)) {
                    hits.insert(id.to_string());
                }
            }
            matched = Some(match matched {
                Some(previous) => previous.intersection(&hits).cloned().collect(),
                None => hits,
            });
        }
        // comparisons is non-empty by construction
        Ok(matched.unwrap_or_default())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn row_value<'a>(row: &'a Row, field: &str) -> Result<&'a str, ConfigurationError> {
    row.get(field)
        .map(String::as_str)
        .ok_or_else(|| ConfigurationError::MissingColumn {
            field: field.to_string(),
        })
}
