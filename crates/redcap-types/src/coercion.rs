//! Raw value coercion
//!
//! REDCap exports every value as a string. Before comparison, the query
//! literal and each row value are converted with the coercer resolved from
//! the field's declared type, so `"5"` and `"5.0"` compare equal on a
//! numeric field and unequal on an unvalidated one.

use crate::{FieldType, FieldValue};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Pattern accepted for `date_ymd` validated fields
const DATE_YMD_FORMAT: &str = "%Y-%m-%d";

/// Coercion errors
#[derive(Debug, Clone, Error)]
pub enum CoercionError {
    /// Value under a numeric field is not a number
    #[error("value '{value}' for field '{field}' is not numeric")]
    NotNumeric { field: String, value: String },

    /// Value under a date field does not match `YYYY-MM-DD`
    #[error("value '{value}' for field '{field}' is not a YYYY-MM-DD date")]
    MalformedDate { field: String, value: String },
}

/// Coercion result
pub type CoercionResult<T> = Result<T, CoercionError>;

/// Converts raw exported strings into comparable values for one field.
///
/// Email-validated fields are rejected by the query layer before a coercer
/// is resolved; every other declared type maps to exactly one conversion.
#[derive(Debug, Clone)]
pub struct ValueCoercer {
    field: String,
    target: FieldType,
}

impl ValueCoercer {
    /// Resolve the coercer for a field with the given declared type
    pub fn new(field: impl Into<String>, target: FieldType) -> Self {
        Self {
            field: field.into(),
            target,
        }
    }

    /// The field this coercer converts values for
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The declared type conversions are resolved against
    pub const fn target(&self) -> FieldType {
        self.target
    }

    /// Coerce one raw value
    pub fn coerce(&self, raw: &str) -> CoercionResult<FieldValue> {
        match self.target {
            FieldType::Number | FieldType::Integer => {
                let parsed =
                    Decimal::from_str(raw.trim()).map_err(|_| CoercionError::NotNumeric {
                        field: self.field.clone(),
                        value: raw.to_string(),
                    })?;
                Ok(FieldValue::Number(parsed))
            }
            FieldType::DateYmd => {
                let parsed = NaiveDate::parse_from_str(raw, DATE_YMD_FORMAT).map_err(|_| {
                    CoercionError::MalformedDate {
                        field: self.field.clone(),
                        value: raw.to_string(),
                    }
                })?;
                Ok(FieldValue::Date(parsed))
            }
            FieldType::Email | FieldType::Text => Ok(FieldValue::Text(raw.to_string())),
        }
    }
}
