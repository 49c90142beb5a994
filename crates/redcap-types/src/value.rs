//! Runtime comparable values

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field value after coercion, ready for comparison.
///
/// Evaluation only ever compares two values produced by the same coercer,
/// so both sides always carry the same variant; the derived ordering keeps
/// the type totally ordered regardless.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldValue {
    /// Uncoerced text
    Text(String),
    /// Numeric value, exact decimal
    Number(Decimal),
    /// Calendar date
    Date(NaiveDate),
}

impl FieldValue {
    /// Check if this value is numeric
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Check if this value is a date
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{d}"),
        }
    }
}
