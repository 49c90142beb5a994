//! Query construction and evaluation errors

use redcap_types::CoercionError;
use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Caller misuse of the query API
#[derive(Debug, Clone, Error)]
pub enum ConfigurationError {
    /// A query needs at least one comparison
    #[error("query on field '{field}' has no comparisons")]
    EmptyComparisons { field: String },

    /// The queried field is not part of the project
    #[error("field '{field}' not found in project")]
    UnknownField { field: String },

    /// Email-validated fields are not comparable
    #[error("field '{field}' is email-validated; filtering on email fields is not supported")]
    EmailComparison { field: String },

    /// An exported row does not carry a requested column
    #[error("exported row is missing column '{field}'")]
    MissingColumn { field: String },
}

/// Errors raised while constructing or evaluating a query
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Caller misuse
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A row value or literal did not convert under the declared type
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}
