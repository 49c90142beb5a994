//! REDCap field type system
//!
//! This crate defines the value layer of the query engine:
//! - Declared field types resolved from project metadata
//! - Runtime comparable values
//! - Coercion of raw exported strings into comparable values

pub mod coercion;
pub mod field_type;
pub mod value;

pub use coercion::{CoercionError, CoercionResult, ValueCoercer};
pub use field_type::FieldType;
pub use value::FieldValue;
