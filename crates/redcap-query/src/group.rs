//! Query groups
//!
//! A group composes queries and nested groups with explicit AND/OR
//! connectors in insertion order. Evaluation folds the members' identifier
//! sets left to right: AND intersects, OR unions. There is no precedence
//! beyond explicit nesting, and every member is evaluated (no
//! short-circuiting), so an error in a later member is never masked.

use crate::Row;
use crate::comparator::Connector;
use crate::error::QueryResult;
use crate::query::Query;
use redcap_types::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A query or a nested group.
///
/// Group members are polymorphic over rendering and evaluation; the two
/// variants are the closed set of things a group can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryExpr {
    /// A single-field query
    Query(Query),
    /// A nested group, parenthesized when rendered
    Group(Box<QueryGroup>),
}

impl QueryExpr {
    /// Render for diagnostics; nested groups are wrapped in parentheses
    pub fn render(&self) -> String {
        match self {
            Self::Query(query) => query.render(),
            Self::Group(group) => format!("({})", group.render()),
        }
    }

    /// All field names referenced by this expression, in first-reference
    /// order without duplicates
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Query(query) => {
                if !out.contains(&query.field()) {
                    out.push(query.field());
                }
            }
            Self::Group(group) => {
                for member in group.members() {
                    member.collect_fields(out);
                }
            }
        }
    }

    /// Evaluate against exported rows.
    ///
    /// `field_type` resolves the declared type per field, since members of
    /// a group may reference different fields.
    pub fn evaluate<F>(
        &self,
        rows: &[Row],
        id_field: &str,
        field_type: &F,
    ) -> QueryResult<BTreeSet<String>>
    where
        F: Fn(&str) -> FieldType,
    {
        match self {
            Self::Query(query) => query.evaluate(rows, id_field, field_type(query.field())),
            Self::Group(group) => group.evaluate(rows, id_field, field_type),
        }
    }
}

impl From<Query> for QueryExpr {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}

impl From<QueryGroup> for QueryExpr {
    fn from(group: QueryGroup) -> Self {
        Self::Group(Box::new(group))
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// An ordered composition of queries and nested groups joined by AND/OR.
///
/// A group always has at least one member and never shrinks. Each appended
/// member is stored together with the connector joining it to its
/// predecessor, so "one connector per adjacent pair" holds structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryGroup {
    first: QueryExpr,
    rest: Vec<(Connector, QueryExpr)>,
}

impl QueryGroup {
    /// Create a group seeded with its first member
    pub fn new(first: impl Into<QueryExpr>) -> Self {
        Self {
            first: first.into(),
            rest: Vec::new(),
        }
    }

    /// Append a member joined to the previous one by `connector`
    pub fn append(&mut self, member: impl Into<QueryExpr>, connector: Connector) {
        self.rest.push((connector, member.into()));
    }

    /// Number of members
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// A group is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate members in insertion order.
    ///
    /// The iteration borrows the group and restarts from the first member
    /// on every call; no cursor state lives on the group itself.
    pub fn members(&self) -> impl Iterator<Item = &QueryExpr> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, member)| member))
    }

    /// Render for diagnostics.
    ///
    /// A single-member group renders as that member alone; otherwise each
    /// member is followed by the connector joining it to the next, with
    /// single-space separation.
    pub fn render(&self) -> String {
        let mut out = self.first.render();
        for (connector, member) in &self.rest {
            out.push(' ');
            out.push_str(match connector {
                Connector::And => "AND",
                Connector::Or => "OR",
            });
            out.push(' ');
            out.push_str(&member.render());
        }
        out
    }

    /// Evaluate every member against the same rows and fold the identifier
    /// sets left to right: AND intersects, OR unions.
    pub fn evaluate<F>(
        &self,
        rows: &[Row],
        id_field: &str,
        field_type: &F,
    ) -> QueryResult<BTreeSet<String>>
    where
        F: Fn(&str) -> FieldType,
    {
        let mut matched = self.first.evaluate(rows, id_field, field_type)?;
        for (connector, member) in &self.rest {
            let ids = member.evaluate(rows, id_field, field_type)?;
            matched = match connector {
                Connector::And => matched.intersection(&ids).cloned().collect(),
                Connector::Or => matched.union(&ids).cloned().collect(),
            };
        }
        Ok(matched)
    }
}

impl fmt::Display for QueryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
