//! Project metadata (data dictionary)

use redcap_types::FieldType;
use serde::{Deserialize, Serialize};

/// One metadata record as exported with `content=metadata`.
///
/// Only the columns the client reads are modeled; unknown columns in the
/// response are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Unique field name
    pub field_name: String,
    /// Form the field belongs to
    #[serde(default)]
    pub form_name: String,
    /// Human-readable label
    #[serde(default)]
    pub field_label: String,
    /// Input widget type (text, radio, calc, ...)
    #[serde(default)]
    pub field_type: String,
    /// Validation tag; blank when the field is not validated
    #[serde(default, rename = "text_validation_type_or_show_slider_number")]
    pub validation: String,
}

impl FieldMetadata {
    /// Declared comparison type, `None` when no validation tag is set
    pub fn declared_type(&self) -> Option<FieldType> {
        if self.validation.is_empty() {
            None
        } else {
            Some(FieldType::from_tag(Some(&self.validation)))
        }
    }
}
