//! REDCap API client and local query engine for Rust
//!
//! This crate wraps the REDCap export API and lets a caller pose boolean
//! queries over project fields, evaluated locally against exported records:
//! - Build a [`Query`] (one field, AND-combined comparisons) or compose
//!   several into a [`QueryGroup`] with AND/OR connectors
//! - Connect a [`Project`] over a [`RedcapClient`] (or any [`RedcapApi`]
//!   implementation) and run `single_filter` / `filter`
//! - Values coerce by each field's declared type before comparison
//!
//! # Example
//!
//! ```ignore
//! use redcap::{Comparator, Comparison, FieldType, Project, Query, RedcapClient};
//!
//! let client = RedcapClient::new("https://redcap.example.org/api/", token)?;
//! let project = Project::connect(client, "my-study").await?;
//!
//! let adults = Query::new("age", vec![
//!     Comparison::new(Comparator::Ge, "18"),
//!     Comparison::new(Comparator::Lt, "65"),
//! ])?;
//! let ids = project.single_filter(&adults, FieldType::Number).await?;
//! ```

// Re-export all public APIs from internal crates
pub use redcap_client as client;
pub use redcap_query as query;
pub use redcap_types as types;

// Convenience re-exports
pub use redcap_client::{
    ApiError, ApiRequest, ClientError, ClientResult, EventName, ExportRequest, FieldMetadata,
    Project, RawOrLabel, RedcapApi, RedcapClient, RequestKind, Row,
};
pub use redcap_query::{
    Comparator, Comparison, ConfigurationError, Connector, Query, QueryError, QueryExpr,
    QueryGroup, QueryResult,
};
pub use redcap_types::{CoercionError, CoercionResult, FieldType, FieldValue, ValueCoercer};
