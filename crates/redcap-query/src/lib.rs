//! REDCap query engine
//!
//! Local boolean filtering over records exported from a REDCap project:
//! - [`Query`]: one field with AND-combined comparator/literal pairs
//! - [`QueryGroup`]: AND/OR composition of queries and nested groups
//! - Evaluation against exported rows, producing the matching record ids
//!
//! The engine is pure and synchronous; fetching rows and resolving declared
//! field types belong to the client layer.

pub mod comparator;
pub mod error;
pub mod group;
pub mod query;

pub use comparator::{Comparator, Connector};
pub use error::{ConfigurationError, QueryError, QueryResult};
pub use group::{QueryExpr, QueryGroup};
pub use query::{Comparison, Query};

use indexmap::IndexMap;

/// One exported record restricted to the requested columns: field name to
/// raw string value, in export order.
pub type Row = IndexMap<String, String>;
