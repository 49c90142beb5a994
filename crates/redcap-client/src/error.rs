//! Client errors

use redcap_query::{ConfigurationError, QueryError};
use thiserror::Error;

/// Result type for project operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from the remote API surface
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload failed request-kind validation before dispatch
    #[error("invalid payload for {kind} request: {message}")]
    Payload { kind: &'static str, message: String },

    /// Transport failure
    #[error("request to REDCap failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("REDCap returned HTTP {status}")]
    Status { status: u16, body: String },

    /// Response body did not decode as the expected JSON shape
    #[error("failed to decode REDCap response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced by [`crate::Project`] operations.
///
/// Transport failures pass through unmodified; the client never interprets
/// or retries them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Remote API failure
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Query construction or evaluation failure
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Project metadata came back without any fields
    #[error("project metadata has no fields")]
    EmptyMetadata,
}

impl From<ConfigurationError> for ClientError {
    fn from(err: ConfigurationError) -> Self {
        Self::Query(err.into())
    }
}
