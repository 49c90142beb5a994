//! Declared field types
//!
//! REDCap attaches a validation tag to text fields
//! (`text_validation_type_or_show_slider_number`). The engine only
//! distinguishes the tags that change comparison semantics; every other tag
//! compares as plain text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a project field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Floating-point numeric validation
    Number,
    /// Integer validation
    Integer,
    /// Calendar date, `YYYY-MM-DD`
    DateYmd,
    /// Email address validation; never comparable
    Email,
    /// No validation, or an unrecognized tag
    Text,
}

impl FieldType {
    /// Map a raw metadata validation tag to a field type.
    ///
    /// Absent, blank, and unrecognized tags all compare as text.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("number") => Self::Number,
            Some("integer") => Self::Integer,
            Some("date_ymd") => Self::DateYmd,
            Some("email") => Self::Email,
            _ => Self::Text,
        }
    }

    /// Get the metadata tag name
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::DateYmd => "date_ymd",
            Self::Email => "email",
            Self::Text => "text",
        }
    }

    /// Check if this type coerces to a numeric value
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }

    /// Check if values of this type may be compared at all
    pub const fn is_comparable(&self) -> bool {
        !matches!(self, Self::Email)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
